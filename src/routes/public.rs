use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::State;

use crate::contact::{self, ContactMessage};
use crate::render;
use crate::router::View;
use crate::session::AdminUser;
use crate::store::ContentStore;

#[get("/")]
pub fn homepage(store: &State<ContentStore>, admin: Option<AdminUser>) -> RawHtml<String> {
    match store.snapshot() {
        Some(doc) => RawHtml(render::render_home(&doc, admin.is_some())),
        None => RawHtml(render::render_loading()),
    }
}

/// Category detail: offers whose `category` equals the category's name.
/// An unknown slug 404s; a known category with no matching offers renders
/// the empty-state message.
#[get("/categoria/<slug>")]
pub fn category_detail(
    store: &State<ContentStore>,
    slug: &str,
    admin: Option<AdminUser>,
) -> Option<RawHtml<String>> {
    let doc = match store.snapshot() {
        Some(d) => d,
        None => return Some(RawHtml(render::render_loading())),
    };
    let view = View::CategoryDetail(slug.to_string());
    render::render_view(&doc, &view, admin.is_some()).map(RawHtml)
}

/// Marketplace detail: offers whose `marketplace` equals the name.
#[get("/marketplace/<name>")]
pub fn marketplace_detail(
    store: &State<ContentStore>,
    name: &str,
    admin: Option<AdminUser>,
) -> Option<RawHtml<String>> {
    let doc = match store.snapshot() {
        Some(d) => d,
        None => return Some(RawHtml(render::render_loading())),
    };
    let view = View::MarketplaceDetail(name.to_string());
    render::render_view(&doc, &view, admin.is_some()).map(RawHtml)
}

#[derive(Debug, FromForm)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Hands the message off to the visitor's mail handler via a mailto:
/// redirect. Nothing is sent from the server. Incomplete submissions (only
/// possible with the browser's `required` checks bypassed) bounce back to
/// the form.
#[post("/contato", data = "<form>")]
pub fn contact_submit(
    form: Form<ContactForm>,
    store: &State<ContentStore>,
) -> Result<Redirect, Status> {
    let doc = store.snapshot().ok_or(Status::ServiceUnavailable)?;
    let message = ContactMessage {
        name: form.name.clone(),
        email: form.email.clone(),
        message: form.message.clone(),
    };
    if message.validate().is_err() {
        return Ok(Redirect::to("/#contato"));
    }
    Ok(Redirect::to(contact::mailto_link(
        &doc.contact.email_to,
        &message,
    )))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![homepage, category_detail, marketplace_detail, contact_submit]
}
