use serde::{Deserialize, Serialize};

/// Languages with a built-in message catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pt-BR")]
    BrazilianPortuguese,
}

impl Locale {
    /// Parse a language tag such as `en`, `en-US` or `pt-BR`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Self::English),
            "pt" => Some(Self::BrazilianPortuguese),
            _ => None,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::BrazilianPortuguese => "pt-BR",
        }
    }
}

/// User-facing strings shown in the status line and the dependent select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub loading: String,
    pub no_results: String,
    pub scroll_for_more: String,
    pub load_failed: String,
    pub select_from_list: String,
    pub placeholder: String,
    pub options_failed: String,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::English => Self::english(),
            Locale::BrazilianPortuguese => Self::portuguese(),
        }
    }

    pub fn english() -> Self {
        Self {
            loading: "Loading...".into(),
            no_results: "No results found.".into(),
            scroll_for_more: "Scroll for more.".into(),
            load_failed: "Could not load results.".into(),
            select_from_list: "Select an item from the list.".into(),
            placeholder: "Select".into(),
            options_failed: "Error loading".into(),
        }
    }

    pub fn portuguese() -> Self {
        Self {
            loading: "Carregando...".into(),
            no_results: "Nenhuma empresa encontrada.".into(),
            scroll_for_more: "Role para carregar mais.".into(),
            load_failed: "Nao foi possivel carregar empresas.".into(),
            select_from_list: "Selecione uma empresa da lista.".into(),
            placeholder: "Selecione".into(),
            options_failed: "Erro ao carregar".into(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}
