use rocket::form::Form;
use rocket::http::{ContentType, CookieJar, Header, Status};
use rocket::response::content::RawHtml;
use rocket::response::{self, Redirect, Responder};
use rocket::{Request, State};

use crate::render;
use crate::session::{self, AdminGate, AdminSessions, AdminUser, SESSION_COOKIE};
use crate::store::{ContentEdit, ContentStore, EXPORT_FILENAME};

/// Responder that offers the serialized document as a file download for
/// manual re-upload to the hosting location.
pub struct Download(String);

impl<'r> Responder<'r, 'static> for Download {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let mut resp = self.0.respond_to(req)?;
        resp.set_header(ContentType::JSON);
        resp.set_header(Header::new(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
        ));
        Ok(resp)
    }
}

#[derive(Debug, FromForm)]
pub struct LoginForm {
    pub password: String,
}

/// The three text fields the admin panel wires. All other admin-editable
/// surfaces in the document are edited by re-uploading content.json.
#[derive(Debug, FromForm)]
pub struct EditForm {
    pub site_name: String,
    pub hero_title: String,
    pub hero_subtitle: String,
}

#[get("/login")]
pub fn login_page(store: &State<ContentStore>) -> RawHtml<String> {
    match store.snapshot() {
        Some(doc) => RawHtml(render::render_admin_login(&doc, None)),
        None => RawHtml(render::render_loading()),
    }
}

#[post("/login", data = "<form>")]
pub fn login_submit(
    form: Form<LoginForm>,
    store: &State<ContentStore>,
    sessions: &State<AdminSessions>,
    cookies: &CookieJar<'_>,
) -> Result<Redirect, RawHtml<String>> {
    let doc = match store.snapshot() {
        Some(d) => d,
        None => return Err(RawHtml(render::render_loading())),
    };

    let mut gate = AdminGate::new();
    gate.open_login();
    if gate.submit(&form.password, &doc.admin.password) {
        let token = sessions.create();
        session::set_session_cookie(cookies, &token);
        Ok(Redirect::to("/"))
    } else {
        Err(RawHtml(render::render_admin_login(
            &doc,
            Some("Senha incorreta!"),
        )))
    }
}

/// Closing the panel ends the session.
#[get("/logout")]
pub fn logout(
    sessions: &State<AdminSessions>,
    cookies: &CookieJar<'_>,
) -> Redirect {
    if let Some(cookie) = cookies.get_private(SESSION_COOKIE) {
        sessions.destroy(cookie.value());
    }
    session::clear_session_cookie(cookies);
    Redirect::to("/")
}

/// Apply the typed edits from the panel form. Each edit swaps in a fresh
/// snapshot; edits live only in memory until exported.
#[post("/content", data = "<form>")]
pub fn edit_content(
    _admin: AdminUser,
    form: Form<EditForm>,
    store: &State<ContentStore>,
) -> Result<Redirect, Status> {
    store
        .apply(ContentEdit::SiteName(form.site_name.clone()))
        .and_then(|_| store.apply(ContentEdit::HeroTitle(form.hero_title.clone())))
        .and_then(|_| store.apply(ContentEdit::HeroSubtitle(form.hero_subtitle.clone())))
        .map_err(|e| {
            log::error!("Content edit failed: {}", e);
            Status::ServiceUnavailable
        })?;
    Ok(Redirect::to("/"))
}

#[get("/export")]
pub fn export(_admin: AdminUser, store: &State<ContentStore>) -> Option<Download> {
    store.export_json().map(Download)
}

/// Catch-all for any /admin/* route that failed the AdminUser guard.
#[get("/<_path..>", rank = 99)]
pub fn admin_redirect_to_login(_path: std::path::PathBuf) -> Redirect {
    Redirect::to("/admin/login")
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        login_page,
        login_submit,
        logout,
        edit_content,
        export,
        admin_redirect_to_login
    ]
}
