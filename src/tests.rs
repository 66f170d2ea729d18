#![cfg(test)]

use std::fs;

use serde_json::{json, Value};

use crate::contact::{mailto_link, ContactMessage};
use crate::models::content::{
    About, Admin, Branding, Category, Contact, ContentDocument, Hero, Marketplace, Offer,
    SocialLink,
};
use crate::pricing;
use crate::render;
use crate::router::{ScrollStore, SessionScroll, View, ViewRouter, SCROLL_SETTLE_MS};
use crate::session::{AdminGate, AdminSessions};
use crate::store::{self, ContentEdit, ContentStore};

fn offer(id: i64, title: &str, marketplace: &str, category: &str) -> Offer {
    Offer {
        id,
        title: title.to_string(),
        marketplace: marketplace.to_string(),
        category: category.to_string(),
        image: "https://example.com/img.jpg".to_string(),
        original_price: "R$ 100,00".to_string(),
        sale_price: "R$ 75,00".to_string(),
        discount: "25%".to_string(),
        affiliate_url: "https://example.com/oferta".to_string(),
    }
}

/// Two marketplaces, two categories, three offers — one of which points at a
/// category that does not exist, to exercise the silent-degrade behavior.
fn test_doc() -> ContentDocument {
    ContentDocument {
        branding: Branding {
            site_name: "Meus Descontos Online".to_string(),
            bg_image: String::new(),
            primary: "#0d6efd".to_string(),
            accent: "#ff7a00".to_string(),
            font: "font-inter".to_string(),
        },
        hero: Hero {
            title: "Todos os Melhores Descontos".to_string(),
            subtitle: "Em um só lugar".to_string(),
            cta_text: "Aproveitar Agora".to_string(),
        },
        marketplaces: vec![
            Marketplace {
                name: "Amazon".to_string(),
                logo: "🛒".to_string(),
                description: "Entrega rápida".to_string(),
                affiliate_url: "https://amzn.example/aff".to_string(),
                color: "#FF9900".to_string(),
            },
            Marketplace {
                name: "Mercado Livre".to_string(),
                logo: "🤝".to_string(),
                description: "De tudo um pouco".to_string(),
                affiliate_url: "https://ml.example/aff".to_string(),
                color: "#FFE600".to_string(),
            },
        ],
        categories: vec![
            Category {
                name: "Tecnologia".to_string(),
                slug: "tecnologia".to_string(),
                icon: "💻".to_string(),
                description: "Gadgets".to_string(),
            },
            Category {
                name: "Casa e Jardim".to_string(),
                slug: "casa-jardim".to_string(),
                icon: "🏡".to_string(),
                description: "Para o lar".to_string(),
            },
        ],
        offers: vec![
            offer(1, "Notebook", "Amazon", "Tecnologia"),
            offer(2, "Fone", "Mercado Livre", "Tecnologia"),
            offer(3, "Panela", "Amazon", "Cozinha"), // no such category
        ],
        about: About {
            title: "Sobre Nós".to_string(),
            text: "Organizamos promoções.".to_string(),
        },
        contact: Contact {
            title: "Entre em Contato".to_string(),
            email_to: "contato@example.com".to_string(),
            notice: "Este site contém links de afiliados.".to_string(),
            social_links: vec![SocialLink {
                name: "Instagram".to_string(),
                url: "https://instagram.com/exemplo".to_string(),
                icon: "📸".to_string(),
            }],
        },
        admin: Admin {
            password: "admin123".to_string(),
        },
    }
}

fn temp_content_file(contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("vitrine_test_{}.json", uuid::Uuid::new_v4()));
    fs::write(&path, contents).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════
// Shape validation
// ═══════════════════════════════════════════════════════════

#[test]
fn validate_shape_accepts_complete_document() {
    let value = serde_json::to_value(test_doc()).unwrap();
    assert!(store::validate_shape(&value));
}

#[test]
fn validate_shape_accepts_default_document() {
    let value = serde_json::to_value(ContentDocument::default_document()).unwrap();
    assert!(store::validate_shape(&value));
}

#[test]
fn validate_shape_rejects_missing_section() {
    let mut value = serde_json::to_value(test_doc()).unwrap();
    value.as_object_mut().unwrap().remove("admin");
    assert!(!store::validate_shape(&value));
}

#[test]
fn validate_shape_rejects_wrong_section_kind() {
    let mut value = serde_json::to_value(test_doc()).unwrap();
    value["offers"] = json!({"not": "an array"});
    assert!(!store::validate_shape(&value));
    let mut value = serde_json::to_value(test_doc()).unwrap();
    value["hero"] = json!("just a string");
    assert!(!store::validate_shape(&value));
}

#[test]
fn validate_shape_rejects_non_object() {
    assert!(!store::validate_shape(&json!([])));
    assert!(!store::validate_shape(&json!(null)));
}

// ═══════════════════════════════════════════════════════════
// Content schema & filtering
// ═══════════════════════════════════════════════════════════

#[test]
fn serializes_with_camel_case_field_names() {
    let raw = serde_json::to_string(&test_doc()).unwrap();
    for field in [
        "siteName",
        "bgImage",
        "ctaText",
        "affiliateUrl",
        "originalPrice",
        "salePrice",
        "emailTo",
        "socialLinks",
    ] {
        assert!(raw.contains(field), "missing wire field {}", field);
    }
}

#[test]
fn category_filter_is_exact_name_match() {
    let doc = test_doc();
    let tech: Vec<i64> = doc
        .offers_in_category("Tecnologia")
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(tech, vec![1, 2]);
    // Every offer in every category's set matches exactly; no strays.
    for cat in &doc.categories {
        for o in doc.offers_in_category(&cat.name) {
            assert_eq!(o.category, cat.name);
        }
    }
}

#[test]
fn marketplace_filter_is_exact_name_match() {
    let doc = test_doc();
    let amazon: Vec<i64> = doc
        .offers_from_marketplace("Amazon")
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(amazon, vec![1, 3]);
    for mp in &doc.marketplaces {
        for o in doc.offers_from_marketplace(&mp.name) {
            assert_eq!(o.marketplace, mp.name);
        }
    }
}

#[test]
fn dangling_reference_degrades_to_empty() {
    let doc = test_doc();
    // Offer 3 references category "Cozinha" which does not exist; it simply
    // never shows up in any category view.
    assert!(doc.category_by_slug("cozinha").is_none());
    assert!(doc.offers_in_category("Casa e Jardim").is_empty());
}

#[test]
fn lookups_by_slug_and_name() {
    let doc = test_doc();
    assert_eq!(
        doc.category_by_slug("casa-jardim").map(|c| c.name.as_str()),
        Some("Casa e Jardim")
    );
    assert!(doc.category_by_slug("nao-existe").is_none());
    assert_eq!(
        doc.marketplace_by_name("Mercado Livre")
            .map(|m| m.logo.as_str()),
        Some("🤝")
    );
    assert!(doc.marketplace_by_name("Shopee").is_none());
}

// ═══════════════════════════════════════════════════════════
// Store: load, edits, export
// ═══════════════════════════════════════════════════════════

#[test]
fn load_roundtrips_through_export() {
    let original = serde_json::to_string_pretty(&test_doc()).unwrap();
    let path = temp_content_file(&original);
    let doc = ContentStore::load(path.to_str().unwrap()).unwrap();
    let store = ContentStore::with_document(doc);
    let exported = store.export_json().unwrap();
    let a: Value = serde_json::from_str(&original).unwrap();
    let b: Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(a, b);
    let _ = fs::remove_file(path);
}

#[test]
fn load_fails_on_missing_file() {
    assert!(ContentStore::load("/nonexistent/content.json").is_err());
}

#[test]
fn load_fails_on_malformed_json() {
    let path = temp_content_file("{not json");
    assert!(ContentStore::load(path.to_str().unwrap()).is_err());
    let _ = fs::remove_file(path);
}

#[test]
fn load_fails_closed_on_shape_mismatch() {
    let path = temp_content_file(r#"{"branding": {}, "hero": {}}"#);
    assert!(ContentStore::load(path.to_str().unwrap()).is_err());
    let _ = fs::remove_file(path);
}

#[test]
fn edit_produces_new_snapshot_and_leaves_original_untouched() {
    let doc = test_doc();
    let edited = ContentEdit::HeroTitle("Novo Título".to_string()).apply(&doc);
    assert_eq!(edited.hero.title, "Novo Título");
    // Original snapshot unchanged.
    assert_eq!(doc.hero.title, "Todos os Melhores Descontos");
    // Sibling paths unchanged.
    assert_eq!(edited.hero.subtitle, doc.hero.subtitle);
    assert_eq!(edited.hero.cta_text, doc.hero.cta_text);
    assert_eq!(edited.branding.site_name, doc.branding.site_name);
    assert_eq!(edited.offers.len(), doc.offers.len());
}

#[test]
fn store_apply_swaps_snapshot() {
    let store = ContentStore::with_document(test_doc());
    let before = store.snapshot().unwrap();
    store
        .apply(ContentEdit::SiteName("Outro Nome".to_string()))
        .unwrap();
    let after = store.snapshot().unwrap();
    assert_eq!(after.branding.site_name, "Outro Nome");
    // The reader holding the previous Arc still sees the old value.
    assert_eq!(before.branding.site_name, "Meus Descontos Online");
}

#[test]
fn store_apply_without_document_errors() {
    let store = ContentStore::empty();
    assert!(store.apply(ContentEdit::SiteName("X".to_string())).is_err());
    assert!(store.snapshot().is_none());
    assert!(store.export_json().is_none());
}

#[test]
fn export_is_pretty_printed() {
    let store = ContentStore::with_document(test_doc());
    let exported = store.export_json().unwrap();
    assert!(exported.contains('\n'));
    assert!(exported.contains("  \"branding\""));
}

// ═══════════════════════════════════════════════════════════
// Slug & URL helpers
// ═══════════════════════════════════════════════════════════

#[test]
fn slug_strips_accents_and_specials() {
    assert_eq!(store::generate_slug("Casa & Jardim"), "casa-jardim");
    assert_eq!(store::generate_slug("  Ação!  "), "acao");
    assert_eq!(store::generate_slug("Bebês"), "bebes");
    assert_eq!(store::generate_slug("Já---Formatado"), "ja-formatado");
}

#[test]
fn url_validation() {
    assert!(store::is_valid_url("https://example.com/x?y=1"));
    assert!(!store::is_valid_url("não é url"));
}

// ═══════════════════════════════════════════════════════════
// Pricing
// ═══════════════════════════════════════════════════════════

#[test]
fn parse_price_accepts_brl_display_strings() {
    assert_eq!(pricing::parse_price("R$ 100,00"), Some(100.0));
    assert_eq!(pricing::parse_price("R$ 1.234,56"), Some(1234.56));
    assert_eq!(pricing::parse_price("75"), Some(75.0));
    assert_eq!(pricing::parse_price("grátis"), None);
}

#[test]
fn format_price_localizes() {
    assert_eq!(pricing::format_price("100"), "R$ 100,00");
    assert_eq!(pricing::format_price("R$ 1.234,56"), "R$ 1.234,56");
    assert_eq!(pricing::format_price("1234567,8"), "R$ 1.234.567,80");
    assert_eq!(pricing::format_price("sem preço"), "R$ 0,00");
}

#[test]
fn discount_label_rounds_to_whole_percent() {
    assert_eq!(pricing::discount_label("R$ 100,00", "R$ 75,00"), "25%");
    assert_eq!(pricing::discount_label("R$ 89,90", "R$ 59,90"), "33%");
}

#[test]
fn discount_label_zero_on_non_positive_or_unparseable() {
    assert_eq!(pricing::discount_label("0", "50"), "0%");
    assert_eq!(pricing::discount_label("100", "0"), "0%");
    assert_eq!(pricing::discount_label("abc", "50"), "0%");
}

// ═══════════════════════════════════════════════════════════
// View router & scroll memory
// ═══════════════════════════════════════════════════════════

#[test]
fn router_starts_at_home() {
    let router = ViewRouter::new(SessionScroll::default());
    assert_eq!(*router.view(), View::Home);
}

#[test]
fn leaving_home_captures_offset_and_return_restores_it() {
    let mut router = ViewRouter::new(SessionScroll::default());
    router.select_category("tecnologia", 400);
    assert_eq!(*router.view(), View::CategoryDetail("tecnologia".to_string()));
    // Restored after the settle delay.
    assert_eq!(router.back_to_home(), Some(400));
    assert_eq!(*router.view(), View::Home);
    assert_eq!(SCROLL_SETTLE_MS, 100);
}

#[test]
fn marketplace_transition_tracks_offset_too() {
    let mut router = ViewRouter::new(SessionScroll::default());
    router.select_marketplace("Amazon", 1200);
    assert_eq!(
        *router.view(),
        View::MarketplaceDetail("Amazon".to_string())
    );
    assert_eq!(router.back_to_home(), Some(1200));
}

#[test]
fn detail_to_detail_is_unreachable() {
    let mut router = ViewRouter::new(SessionScroll::default());
    router.select_marketplace("Amazon", 50);
    router.select_category("tecnologia", 999);
    assert_eq!(
        *router.view(),
        View::MarketplaceDetail("Amazon".to_string())
    );
    // The captured offset was not overwritten from inside the detail view.
    assert_eq!(router.back_to_home(), Some(50));
}

#[test]
fn back_from_home_is_a_noop() {
    let mut router = ViewRouter::new(SessionScroll::default());
    assert_eq!(router.back_to_home(), None);
    assert_eq!(*router.view(), View::Home);
}

#[test]
fn session_scroll_store_overwrites() {
    let mut scroll = SessionScroll::default();
    assert_eq!(scroll.read(), None);
    scroll.save(10);
    scroll.save(250);
    assert_eq!(scroll.read(), Some(250));
}

// ═══════════════════════════════════════════════════════════
// Admin gate & sessions
// ═══════════════════════════════════════════════════════════

#[test]
fn admin_gate_login_lifecycle() {
    let mut gate = AdminGate::new();
    assert_eq!(gate, AdminGate::LoggedOut);

    gate.open_login();
    assert_eq!(gate, AdminGate::LoginPrompting);

    // Wrong password: rejected, stays prompting, retry allowed.
    assert!(!gate.submit("senha-errada", "admin123"));
    assert_eq!(gate, AdminGate::LoginPrompting);

    assert!(gate.submit("admin123", "admin123"));
    assert_eq!(gate, AdminGate::LoggedIn);

    gate.close();
    assert_eq!(gate, AdminGate::LoggedOut);
}

#[test]
fn admin_gate_cancel_returns_to_logged_out() {
    let mut gate = AdminGate::new();
    gate.open_login();
    gate.cancel();
    assert_eq!(gate, AdminGate::LoggedOut);
    // Submitting while logged out does nothing.
    assert!(!gate.submit("admin123", "admin123"));
    assert_eq!(gate, AdminGate::LoggedOut);
}

#[test]
fn admin_sessions_create_validate_destroy() {
    let sessions = AdminSessions::new();
    let token = sessions.create();
    assert!(sessions.validate(&token));
    assert!(!sessions.validate("forged-token"));
    sessions.destroy(&token);
    assert!(!sessions.validate(&token));
}

// ═══════════════════════════════════════════════════════════
// Contact handoff
// ═══════════════════════════════════════════════════════════

#[test]
fn contact_requires_all_fields() {
    let ok = ContactMessage {
        name: "Maria".to_string(),
        email: "maria@example.com".to_string(),
        message: "Olá".to_string(),
    };
    assert!(ok.validate().is_ok());

    let mut missing = ok.clone();
    missing.message = "   ".to_string();
    assert!(missing.validate().is_err());
    let mut missing = ok.clone();
    missing.name = String::new();
    assert!(missing.validate().is_err());
    let mut missing = ok;
    missing.email = String::new();
    assert!(missing.validate().is_err());
}

#[test]
fn mailto_link_percent_encodes_subject_and_body() {
    let msg = ContactMessage {
        name: "Maria Silva".to_string(),
        email: "maria@example.com".to_string(),
        message: "Quero saber mais".to_string(),
    };
    let link = mailto_link("contato@example.com", &msg);
    assert!(link.starts_with("mailto:contato@example.com?subject="));
    assert!(link.contains("subject=Contato%20-%20Maria%20Silva"));
    // CRLF-separated body with all three fields.
    assert!(link.contains("Nome%3A%20Maria%20Silva%0D%0A"));
    assert!(link.contains("Email%3A%20maria%40example.com"));
    assert!(link.contains("Mensagem%3A%0D%0AQuero%20saber%20mais"));
    assert!(!link.contains('+'));
}

// ═══════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════

#[test]
fn home_renders_all_sections() {
    let doc = test_doc();
    let html = render::render_home(&doc, false);
    assert!(html.contains("Todos os Melhores Descontos"));
    assert!(html.contains("Nossos Parceiros"));
    assert!(html.contains("/marketplace/Mercado%20Livre"));
    assert!(html.contains("/categoria/casa-jardim"));
    assert!(html.contains("Ofertas em Destaque"));
    assert!(html.contains("Ver Oferta"));
    assert!(html.contains("Sobre Nós"));
    assert!(html.contains("Enviar Mensagem"));
    assert!(html.contains("Este site contém links de afiliados."));
    // Visitor view: login link, no panel.
    assert!(html.contains("/admin/login"));
    assert!(!html.contains("Painel Admin"));
}

#[test]
fn home_in_admin_mode_shows_editable_controls() {
    let doc = test_doc();
    let html = render::render_home(&doc, true);
    assert!(html.contains("Painel Admin"));
    assert!(html.contains(r#"name="site_name" value="Meus Descontos Online""#));
    assert!(html.contains(r#"name="hero_title" value="Todos os Melhores Descontos""#));
    assert!(html.contains("Salvar Configuração"));
    assert!(html.contains("/admin/export"));
}

#[test]
fn category_view_renders_empty_state() {
    let doc = test_doc();
    let cat = doc.category_by_slug("casa-jardim").unwrap().clone();
    let offers = doc.offers_in_category(&cat.name);
    let html = render::render_category(&doc, &cat, &offers, false);
    assert!(html.contains("Nenhuma oferta encontrada nesta categoria."));
    assert!(html.contains("Voltar"));
}

#[test]
fn marketplace_view_renders_matching_offers() {
    let doc = test_doc();
    let mp = doc.marketplace_by_name("Amazon").unwrap().clone();
    let offers = doc.offers_from_marketplace(&mp.name);
    let html = render::render_marketplace(&doc, &mp, &offers, false);
    assert!(html.contains("Notebook"));
    assert!(html.contains("Panela"));
    assert!(!html.contains("Fone"));
    assert!(!html.contains("Nenhuma oferta encontrada"));
}

#[test]
fn marketplace_view_renders_empty_state() {
    let doc = test_doc();
    let mp = doc.marketplace_by_name("Mercado Livre").unwrap().clone();
    let html = render::render_marketplace(&doc, &mp, &[], false);
    assert!(html.contains("Nenhuma oferta encontrada neste marketplace."));
}

#[test]
fn login_page_shows_rejection_notice() {
    let doc = test_doc();
    let html = render::render_admin_login(&doc, Some("Senha incorreta!"));
    assert!(html.contains("Senha incorreta!"));
    assert!(html.contains("Entrar"));
    assert!(html.contains("Cancelar"));
}

#[test]
fn scroll_memory_script_uses_settle_delay() {
    let doc = test_doc();
    let html = render::render_home(&doc, false);
    assert!(html.contains("sessionStorage.getItem('scrollPosition')"));
    assert!(html.contains("},100);"));
}

#[test]
fn html_escape_neutralizes_markup() {
    assert_eq!(
        render::html_escape(r#"<b attr="x">R&D</b>"#),
        "&lt;b attr=&quot;x&quot;&gt;R&amp;D&lt;/b&gt;"
    );
}

#[test]
fn loading_page_is_standalone() {
    let html = render::render_loading();
    assert!(html.contains("Carregando..."));
}
