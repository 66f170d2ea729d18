#[macro_use]
extern crate rocket;

use rocket::fs::FileServer;
use rocket::response::content::RawHtml;

mod boot;
mod contact;
mod models;
mod pricing;
mod render;
mod router;
mod routes;
mod session;
mod store;
mod tests;

use session::AdminSessions;
use store::ContentStore;

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Página não encontrada.</p><a href='/'>← Início</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Erro interno do servidor.</p><a href='/'>← Início</a></body></html>".to_string())
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    // Boot check — verify/create directories, seed starter content
    boot::run();

    // The document is loaded exactly once; edits only touch the in-memory
    // snapshot and are persisted by exporting and redeploying content.json.
    let content = ContentStore::boot(&store::content_path());

    rocket::build()
        .manage(content)
        .manage(AdminSessions::new())
        .mount("/static", FileServer::from("website/static"))
        .mount("/", routes::public::routes())
        .mount("/admin", routes::admin::routes())
        .register("/", catchers![not_found, server_error])
}
