use serde::{Deserialize, Serialize};

/// Site identity block. All fields are admin-editable in principle, though
/// the current admin panel only exposes `site_name`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub site_name: String,
    pub bg_image: String,
    pub primary: String,
    pub accent: String,
    pub font: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Marketplace {
    pub name: String,
    pub logo: String,
    pub description: String,
    pub affiliate_url: String,
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub icon: String,
    pub description: String,
}

/// A single discount offer. `marketplace` and `category` are free-text
/// cross-references to `marketplaces[].name` / `categories[].name`; a value
/// that matches nothing degrades to an empty filtered list, never an error.
/// `discount` is a display string maintained by hand, not derived from the
/// two prices.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: i64,
    pub title: String,
    pub marketplace: String,
    pub category: String,
    pub image: String,
    pub original_price: String,
    pub sale_price: String,
    pub discount: String,
    pub affiliate_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct About {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub title: String,
    pub email_to: String,
    pub notice: String,
    pub social_links: Vec<SocialLink>,
}

/// Plaintext admin password, compared as-is. This is a UI convenience gate
/// for the site owner, not an access-control boundary: the document it lives
/// in is the same one the site serves from.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Admin {
    pub password: String,
}

/// The whole catalog document. Loaded once from content.json, held in memory
/// for the life of the process, mutated only through typed edits that
/// produce a fresh snapshot. The only write-back path is the export download.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContentDocument {
    pub branding: Branding,
    pub hero: Hero,
    pub marketplaces: Vec<Marketplace>,
    pub categories: Vec<Category>,
    pub offers: Vec<Offer>,
    pub about: About,
    pub contact: Contact,
    pub admin: Admin,
}

impl ContentDocument {
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn marketplace_by_name(&self, name: &str) -> Option<&Marketplace> {
        self.marketplaces.iter().find(|m| m.name == name)
    }

    /// Offers whose `category` field exactly equals the category name.
    pub fn offers_in_category(&self, category_name: &str) -> Vec<&Offer> {
        self.offers
            .iter()
            .filter(|o| o.category == category_name)
            .collect()
    }

    /// Offers whose `marketplace` field exactly equals the marketplace name.
    pub fn offers_from_marketplace(&self, marketplace_name: &str) -> Vec<&Offer> {
        self.offers
            .iter()
            .filter(|o| o.marketplace == marketplace_name)
            .collect()
    }

    /// Starter document written on first boot when no content.json exists.
    pub fn default_document() -> Self {
        ContentDocument {
            branding: Branding {
                site_name: "Meus Descontos Online".to_string(),
                bg_image: String::new(),
                primary: "#0d6efd".to_string(),
                accent: "#ff7a00".to_string(),
                font: "font-inter".to_string(),
            },
            hero: Hero {
                title: "Todos os Melhores Descontos em um só Lugar".to_string(),
                subtitle: "Acesso rápido a Mercado Livre, Amazon, Magazine Luiza, Americanas, Shopee e AliExpress".to_string(),
                cta_text: "Aproveitar Agora".to_string(),
            },
            marketplaces: vec![Marketplace {
                name: "Amazon".to_string(),
                logo: "🛒".to_string(),
                description: "Milhares de produtos com entrega rápida".to_string(),
                affiliate_url: "https://SEU-LINK-AMAZON".to_string(),
                color: "#FF9900".to_string(),
            }],
            categories: vec![Category {
                name: "Tecnologia".to_string(),
                slug: "tecnologia".to_string(),
                icon: "💻".to_string(),
                description: "Smartphones, notebooks, gadgets e mais".to_string(),
            }],
            offers: Vec::new(),
            about: About {
                title: "Sobre Nós".to_string(),
                text: "Organizamos as melhores promoções de forma prática e segura.".to_string(),
            },
            contact: Contact {
                title: "Entre em Contato".to_string(),
                email_to: "contato@meusdescontosonline.com".to_string(),
                notice: "Este site contém links de afiliados. Ao comprar por eles, você apoia nosso trabalho sem pagar nada a mais.".to_string(),
                social_links: Vec::new(),
            },
            admin: Admin {
                password: "admin123".to_string(),
            },
        }
    }
}
