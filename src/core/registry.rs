use crate::domain::model::BrandEntry;
use crate::utils::error::{QrAuthError, Result};

pub const BRANDS: &[BrandEntry] = &[
    BrandEntry { name: "Nike", domain: "nike.com" },
    BrandEntry { name: "Adidas", domain: "adidas.com" },
    BrandEntry { name: "Puma", domain: "puma.com" },
    BrandEntry { name: "US Polo", domain: "uspolo.org" },
    BrandEntry { name: "Levi's", domain: "levi.com" },
    BrandEntry { name: "Zara", domain: "zara.com" },
    BrandEntry { name: "H&M", domain: "hm.com" },
    BrandEntry { name: "Louis Vuitton", domain: "louisvuitton.com" },
    BrandEntry { name: "Gucci", domain: "gucci.com" },
    BrandEntry { name: "Under Armour", domain: "underarmour.com" },
];

pub fn all() -> &'static [BrandEntry] {
    BRANDS
}

/// Exact, case-sensitive lookup by display name.
pub fn find(name: &str) -> Option<&'static BrandEntry> {
    BRANDS.iter().find(|b| b.name == name)
}

/// Lookup used for user typed names: falls back to a case-insensitive match.
pub fn resolve(name: &str) -> Result<&'static BrandEntry> {
    let name = name.trim();
    find(name)
        .or_else(|| BRANDS.iter().find(|b| b.name.eq_ignore_ascii_case(name)))
        .ok_or_else(|| QrAuthError::UnknownBrand {
            name: name.to_string(),
        })
}
