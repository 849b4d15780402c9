//! Web app manifest for installing the generator as a standalone app.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ManifestIcon {
    pub src: &'static str,
    pub sizes: &'static str,
    #[serde(rename = "type")]
    pub mime_type: &'static str,
}

/// Field names follow the W3C manifest (snake_case).
#[derive(Debug, Clone, Serialize)]
pub struct AppManifest {
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub start_url: &'static str,
    pub display: &'static str,
    pub background_color: &'static str,
    pub theme_color: &'static str,
    pub icons: Vec<ManifestIcon>,
}

impl AppManifest {
    pub fn loto() -> Self {
        Self {
            name: "Générateur de Loto",
            short_name: "Loto Gen",
            description: "Générateur de numéros de Loto personnalisable",
            start_url: "/",
            display: "standalone",
            background_color: "#ffffff",
            theme_color: "#000000",
            icons: vec![
                ManifestIcon {
                    src: "/icon-192x192.png",
                    sizes: "192x192",
                    mime_type: "image/png",
                },
                ManifestIcon {
                    src: "/icon-512x512.png",
                    sizes: "512x512",
                    mime_type: "image/png",
                },
            ],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
