use crate::contact::percent_encode as urlencode;
use crate::models::content::{Category, ContentDocument, Marketplace, Offer};
use crate::router::{View, SCROLL_KEY, SCROLL_SETTLE_MS};

/// Render whichever view the router selected. `None` means the view's
/// subject (slug or marketplace name) does not exist in the document.
pub fn render_view(doc: &ContentDocument, view: &View, admin: bool) -> Option<String> {
    match view {
        View::Home => Some(render_home(doc, admin)),
        View::CategoryDetail(slug) => {
            let category = doc.category_by_slug(slug)?;
            let offers = doc.offers_in_category(&category.name);
            Some(render_category(doc, category, &offers, admin))
        }
        View::MarketplaceDetail(name) => {
            let marketplace = doc.marketplace_by_name(name)?;
            let offers = doc.offers_from_marketplace(&marketplace.name);
            Some(render_marketplace(doc, marketplace, &offers, admin))
        }
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Shared page chrome: branding-derived stylesheet, body, footer.
fn page(doc: &ContentDocument, title: &str, body: &str, scripts: &str) -> String {
    let year = chrono::Utc::now().format("%Y");
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
{body}
<footer><p>&copy; {year} {site_name}. Todos os direitos reservados.</p></footer>
{scripts}
</body>
</html>"#,
        title = html_escape(title),
        style = base_style(doc),
        body = body,
        year = year,
        site_name = html_escape(&doc.branding.site_name),
        scripts = scripts,
    )
}

fn base_style(doc: &ContentDocument) -> String {
    let bg = if doc.branding.bg_image.is_empty() {
        "background:linear-gradient(135deg,#eff6ff,#fff7ed)".to_string()
    } else {
        format!(
            "background:url('{}') center/cover fixed",
            html_escape(&doc.branding.bg_image)
        )
    };
    format!(
        "body{{margin:0;font-family:Inter,system-ui,sans-serif;{bg}}}\
         a{{color:{primary};text-decoration:none}}\
         header{{position:sticky;top:0;background:rgba(255,255,255,.95);box-shadow:0 2px 8px rgba(0,0,0,.1);padding:16px 24px;display:flex;justify-content:space-between;align-items:center;z-index:30}}\
         header h1{{font-size:24px;margin:0;color:#1f2937}}\
         nav a{{margin-left:20px;color:#374151}}\
         section{{padding:60px 24px;max-width:1100px;margin:0 auto}}\
         section h2{{text-align:center;color:#fff;text-shadow:0 2px 4px rgba(0,0,0,.4)}}\
         .hero{{text-align:center;padding:120px 24px}}\
         .hero h2{{font-size:42px}}\
         .hero p{{font-size:20px;color:#fff;text-shadow:0 2px 4px rgba(0,0,0,.4)}}\
         .cta{{display:inline-block;background:linear-gradient(90deg,{primary},{accent});color:#fff;padding:14px 32px;border-radius:999px;font-weight:600}}\
         .grid{{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:20px}}\
         .card{{background:rgba(255,255,255,.95);border-radius:16px;padding:20px;box-shadow:0 4px 12px rgba(0,0,0,.12);text-align:center;display:block}}\
         .card .logo{{font-size:36px}}\
         .offer{{background:rgba(255,255,255,.95);border-radius:16px;overflow:hidden;box-shadow:0 4px 12px rgba(0,0,0,.12)}}\
         .offer img{{width:100%;height:180px;object-fit:cover}}\
         .offer .pad{{padding:18px}}\
         .old{{color:#6b7280;text-decoration:line-through;font-size:13px}}\
         .new{{color:#16a34a;font-size:22px;font-weight:700;margin-left:6px}}\
         .badge{{background:#ef4444;color:#fff;border-radius:999px;padding:3px 10px;font-size:13px;font-weight:700;float:right}}\
         .buy{{display:inline-block;background:{accent};color:#fff;padding:8px 18px;border-radius:999px;font-weight:600}}\
         .empty{{text-align:center;color:#fff;text-shadow:0 2px 4px rgba(0,0,0,.4);padding:48px 0}}\
         .about{{text-align:center;color:#fff;text-shadow:0 2px 4px rgba(0,0,0,.4)}}\
         .contact-box{{background:rgba(255,255,255,.95);border-radius:16px;padding:28px;max-width:560px;margin:0 auto}}\
         .contact-box label{{display:block;margin:12px 0 4px;font-size:14px;color:#374151}}\
         .contact-box input,.contact-box textarea{{width:100%;box-sizing:border-box;padding:10px;border:1px solid #d1d5db;border-radius:8px}}\
         .notice-box{{background:rgba(254,252,232,.95);border:1px solid #fde68a;border-radius:10px;padding:14px;font-size:13px;color:#1f2937;margin-top:20px}}\
         .social{{text-align:center;font-size:28px;margin-top:20px}}\
         .social a{{margin:0 10px}}\
         .admin-panel{{position:fixed;top:0;right:0;width:300px;height:100%;background:#fff;box-shadow:-4px 0 12px rgba(0,0,0,.2);padding:20px;box-sizing:border-box;overflow-y:auto;z-index:40}}\
         .admin-panel h3{{margin-top:0}}\
         .admin-panel label{{display:block;margin:12px 0 4px;font-size:13px;font-weight:600}}\
         .admin-panel input,.admin-panel textarea{{width:100%;box-sizing:border-box;padding:8px;border:1px solid #d1d5db;border-radius:8px}}\
         .admin-panel button,.admin-panel .dl{{display:block;width:100%;box-sizing:border-box;text-align:center;margin-top:12px;background:#16a34a;color:#fff;border:0;padding:10px;border-radius:8px;font-weight:600;cursor:pointer}}\
         .admin-panel .dl{{background:{primary}}}\
         .admin-panel .close{{background:#6b7280}}\
         footer{{background:rgba(31,41,55,.95);color:#fff;text-align:center;padding:24px}}",
        bg = bg,
        primary = html_escape(&doc.branding.primary),
        accent = html_escape(&doc.branding.accent),
    )
}

/// Captures the scroll offset into sessionStorage when a detail-view link is
/// followed, so returning home can restore it.
fn scroll_capture_script() -> String {
    format!(
        "<script>document.querySelectorAll('a[data-nav]').forEach(function(a){{\
         a.addEventListener('click',function(){{\
         sessionStorage.setItem('{key}',String(window.scrollY));}});}});</script>",
        key = SCROLL_KEY
    )
}

/// Restores the captured offset after the settle delay.
fn scroll_restore_script() -> String {
    format!(
        "<script>(function(){{var s=sessionStorage.getItem('{key}');\
         if(s){{setTimeout(function(){{window.scrollTo(0,parseInt(s));}},{ms});}}}})();</script>",
        key = SCROLL_KEY,
        ms = SCROLL_SETTLE_MS
    )
}

/// Shown while no document is loaded. A failed load is terminal for the
/// session; the operator log carries the real error.
pub fn render_loading() -> String {
    "<!DOCTYPE html>\
     <html lang=\"pt-BR\"><head><meta charset=\"utf-8\"><title>Carregando...</title></head>\
     <body style=\"font-family:sans-serif;display:flex;min-height:100vh;align-items:center;justify-content:center;background:linear-gradient(135deg,#eff6ff,#fff7ed)\">\
     <p style=\"color:#4b5563\">Carregando...</p>\
     </body></html>"
        .to_string()
}

fn offer_card(offer: &Offer) -> String {
    format!(
        r#"<div class="offer"><img src="{image}" alt="{title}" loading="lazy">
<div class="pad"><h3>{title}</h3>
<span class="badge">-{discount}</span>
<div><span class="old">{original}</span><span class="new">{sale}</span></div>
<div style="margin-top:12px;display:flex;justify-content:space-between;align-items:center">
<span style="font-size:13px;color:#6b7280">{marketplace} &bull; {category}</span>
<a class="buy" href="{url}">Ver Oferta</a>
</div></div></div>"#,
        image = html_escape(&offer.image),
        title = html_escape(&offer.title),
        discount = html_escape(&offer.discount),
        original = html_escape(&offer.original_price),
        sale = html_escape(&offer.sale_price),
        marketplace = html_escape(&offer.marketplace),
        category = html_escape(&offer.category),
        url = html_escape(&offer.affiliate_url),
    )
}

fn offers_grid(offers: &[&Offer]) -> String {
    let mut html = String::from(r#"<div class="grid">"#);
    for offer in offers {
        html.push_str(&offer_card(offer));
    }
    html.push_str("</div>");
    html
}

/// Header used by the detail views: site name plus the explicit back action.
fn detail_header(doc: &ContentDocument) -> String {
    format!(
        r#"<header><h1><a href="/">{site_name}</a></h1><nav><a href="/">&larr; Voltar</a></nav></header>"#,
        site_name = html_escape(&doc.branding.site_name),
    )
}

/// Side panel rendered for a logged-in admin: the three wired text fields,
/// the export download and the close action. The rest of the document is
/// edited by re-uploading content.json by hand.
fn admin_panel(doc: &ContentDocument) -> String {
    format!(
        r#"<aside class="admin-panel"><h3>Painel Admin</h3>
<form method="post" action="/admin/content">
<label>Nome do Site</label>
<input type="text" name="site_name" value="{site_name}">
<label>Título Hero</label>
<input type="text" name="hero_title" value="{hero_title}">
<label>Subtítulo Hero</label>
<textarea name="hero_subtitle" rows="3">{hero_subtitle}</textarea>
<button type="submit">Salvar</button>
</form>
<a class="dl" href="/admin/export" download>Salvar Configuração</a>
<a class="dl close" href="/admin/logout">Fechar</a>
</aside>"#,
        site_name = html_escape(&doc.branding.site_name),
        hero_title = html_escape(&doc.hero.title),
        hero_subtitle = html_escape(&doc.hero.subtitle),
    )
}

pub fn render_home(doc: &ContentDocument, admin: bool) -> String {
    let mut body = String::new();

    if admin {
        body.push_str(&admin_panel(doc));
    }

    let admin_link = if admin {
        String::new()
    } else {
        r#"<a href="/admin/login" title="Admin">&#9881;</a>"#.to_string()
    };
    body.push_str(&format!(
        r##"<header><h1>{site_name}</h1><nav><a href="#inicio">Início</a><a href="#ofertas">Ofertas</a><a href="#contato">Contato</a>{admin_link}</nav></header>"##,
        site_name = html_escape(&doc.branding.site_name),
        admin_link = admin_link,
    ));

    body.push_str(&format!(
        r##"<section id="inicio" class="hero"><h2>{title}</h2><p>{subtitle}</p><a class="cta" href="#ofertas">{cta}</a></section>"##,
        title = html_escape(&doc.hero.title),
        subtitle = html_escape(&doc.hero.subtitle),
        cta = html_escape(&doc.hero.cta_text),
    ));

    body.push_str(r#"<section><h2>Nossos Parceiros</h2><div class="grid">"#);
    for mp in &doc.marketplaces {
        body.push_str(&format!(
            r#"<a class="card" data-nav href="/marketplace/{href}"><div class="logo">{logo}</div><h3>{name}</h3><p>{desc}</p></a>"#,
            href = urlencode(&mp.name),
            logo = html_escape(&mp.logo),
            name = html_escape(&mp.name),
            desc = html_escape(&mp.description),
        ));
    }
    body.push_str("</div></section>");

    body.push_str(r#"<section><h2>Categorias</h2><div class="grid">"#);
    for cat in &doc.categories {
        body.push_str(&format!(
            r#"<a class="card" data-nav href="/categoria/{href}"><div class="logo">{icon}</div><h3>{name}</h3><p>{desc}</p></a>"#,
            href = urlencode(&cat.slug),
            icon = html_escape(&cat.icon),
            name = html_escape(&cat.name),
            desc = html_escape(&cat.description),
        ));
    }
    body.push_str("</div></section>");

    let all_offers: Vec<&Offer> = doc.offers.iter().collect();
    body.push_str(r#"<section id="ofertas"><h2>Ofertas em Destaque</h2>"#);
    body.push_str(&offers_grid(&all_offers));
    body.push_str("</section>");

    body.push_str(&format!(
        r#"<section class="about"><h2>{title}</h2><p>{text}</p></section>"#,
        title = html_escape(&doc.about.title),
        text = html_escape(&doc.about.text),
    ));

    body.push_str(&format!(
        r#"<section id="contato"><h2>{title}</h2>
<form class="contact-box" method="post" action="/contato">
<label for="name">Nome</label><input type="text" id="name" name="name" required>
<label for="email">Email</label><input type="email" id="email" name="email" required>
<label for="message">Mensagem</label><textarea id="message" name="message" rows="5" required></textarea>
<button class="cta" style="border:0;margin-top:16px;cursor:pointer" type="submit">Enviar Mensagem</button>
</form>"#,
        title = html_escape(&doc.contact.title),
    ));
    if !doc.contact.social_links.is_empty() {
        body.push_str(r#"<div class="social">"#);
        for link in &doc.contact.social_links {
            body.push_str(&format!(
                r#"<a href="{url}" aria-label="{name}">{icon}</a>"#,
                url = html_escape(&link.url),
                name = html_escape(&link.name),
                icon = html_escape(&link.icon),
            ));
        }
        body.push_str("</div>");
    }
    body.push_str(&format!(
        r#"<div class="notice-box">{notice}</div></section>"#,
        notice = html_escape(&doc.contact.notice),
    ));

    let scripts = format!("{}{}", scroll_capture_script(), scroll_restore_script());
    page(doc, &doc.branding.site_name, &body, &scripts)
}

pub fn render_category(
    doc: &ContentDocument,
    category: &Category,
    offers: &[&Offer],
    admin: bool,
) -> String {
    let mut body = String::new();
    if admin {
        body.push_str(&admin_panel(doc));
    }
    body.push_str(&detail_header(doc));
    body.push_str(&format!(
        r#"<section><h2>{icon} {name}</h2><p class="about">{desc}</p>"#,
        icon = html_escape(&category.icon),
        name = html_escape(&category.name),
        desc = html_escape(&category.description),
    ));
    if offers.is_empty() {
        body.push_str(r#"<p class="empty">Nenhuma oferta encontrada nesta categoria.</p>"#);
    } else {
        body.push_str(&offers_grid(offers));
    }
    body.push_str("</section>");

    let title = format!("{} - {}", category.name, doc.branding.site_name);
    page(doc, &title, &body, "")
}

pub fn render_marketplace(
    doc: &ContentDocument,
    marketplace: &Marketplace,
    offers: &[&Offer],
    admin: bool,
) -> String {
    let mut body = String::new();
    if admin {
        body.push_str(&admin_panel(doc));
    }
    body.push_str(&detail_header(doc));
    body.push_str(&format!(
        r#"<section><h2>{logo} {name}</h2><p class="about">{desc}</p>
<p style="text-align:center"><a class="buy" href="{url}">Visitar {name}</a></p>"#,
        logo = html_escape(&marketplace.logo),
        name = html_escape(&marketplace.name),
        desc = html_escape(&marketplace.description),
        url = html_escape(&marketplace.affiliate_url),
    ));
    if offers.is_empty() {
        body.push_str(r#"<p class="empty">Nenhuma oferta encontrada neste marketplace.</p>"#);
    } else {
        body.push_str(&offers_grid(offers));
    }
    body.push_str("</section>");

    let title = format!("{} - {}", marketplace.name, doc.branding.site_name);
    page(doc, &title, &body, "")
}

/// The login prompt. Wrong passwords re-render this page with the rejection
/// notice; cancel is the link back home.
pub fn render_admin_login(doc: &ContentDocument, error: Option<&str>) -> String {
    let error_html = match error {
        Some(msg) => format!(
            r#"<p style="color:#dc2626;font-weight:600">{}</p>"#,
            html_escape(msg)
        ),
        None => String::new(),
    };
    let body = format!(
        r#"<section><div class="contact-box" style="margin-top:80px">
<h3>Login Admin</h3>
{error_html}
<form method="post" action="/admin/login">
<label for="password">Senha</label>
<input type="password" id="password" name="password" placeholder="Digite a senha" autofocus>
<button class="cta" style="border:0;margin-top:16px;cursor:pointer" type="submit">Entrar</button>
</form>
<p style="margin-top:12px"><a href="/">Cancelar</a></p>
</div></section>"#,
        error_html = error_html,
    );
    let title = format!("Login Admin - {}", doc.branding.site_name);
    page(doc, &title, &body, "")
}
