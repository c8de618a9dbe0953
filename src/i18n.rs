// English/Korean text swapping for the page chrome.
//
// Elements opt in with a `data-i18n="<key>"` attribute. The chosen locale is
// remembered in localStorage under `lang`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Storage};

pub const STORAGE_KEY: &str = "lang";
pub const KEY_ATTRIBUTE: &str = "data-i18n";
pub const TOGGLE_ID: &str = "lang-toggle";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Locale {
    En,
    Ko,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ko => "ko",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "en" => Some(Locale::En),
            "ko" => Some(Locale::Ko),
            _ => None,
        }
    }

    pub fn other(self) -> Locale {
        match self {
            Locale::En => Locale::Ko,
            Locale::Ko => Locale::En,
        }
    }

    /// Text shown on the toggle button: the locale it would switch to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Locale::En => "KO",
            Locale::Ko => "EN",
        }
    }

    pub fn toggle_aria_label(self) -> &'static str {
        match self {
            Locale::En => "Switch to Korean",
            Locale::Ko => "Switch to English",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::En => EN,
            Locale::Ko => KO,
        }
    }

    pub fn translate(self, key: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| *text)
    }
}

const EN: &[(&str, &str)] = &[
    ("about", "About"),
    ("tagline", "Turn Ideas into Web Services"),
    (
        "description",
        "A project where I experiment with various ideas and turn them into web services.<br>I explore new technologies and create creative solutions.",
    ),
    ("projects-title", "Playground items"),
    ("project-csharp-desc", "Interactive C# programming tutorials and examples"),
    ("project-3d-desc", "Explore and interact with 3D models in the browser"),
    ("project-iui-desc", "Interactive UI experiment with hand gesture recognition"),
    ("project-fe-desc", "Frontend development learning paths and roadmaps"),
    ("copyright", "© 2025 hellomrma. All rights reserved."),
];

const KO: &[(&str, &str)] = &[
    ("about", "소개"),
    ("tagline", "아이디어를 웹 서비스로"),
    (
        "description",
        "다양한 아이디어를 실험하고 웹 서비스로 만들어보는 프로젝트입니다.<br>새로운 기술을 탐구하고 창의적인 솔루션을 만들어갑니다.",
    ),
    ("projects-title", "플레이그라운드 아이템"),
    ("project-csharp-desc", "인터랙티브한 C# 프로그래밍 튜토리얼과 예제"),
    ("project-3d-desc", "브라우저에서 3D 모델을 탐색하고 상호작용하기"),
    ("project-iui-desc", "손 제스처 인식을 활용한 인터랙티브 UI 실험"),
    ("project-fe-desc", "프론트엔드 개발 학습 경로와 로드맵"),
    ("copyright", "© 2025 hellomrma. All rights reserved."),
];

/// Where the chosen locale code is persisted between visits.
pub trait LocaleStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, code: &str) -> Result<(), JsValue>;
}

/// The parts of the page the switcher rewrites.
pub trait LocalizedDocument {
    fn set_language_attribute(&mut self, code: &str) -> Result<(), JsValue>;

    /// Replaces the content of every tagged element whose key `lookup` knows.
    /// Elements with unknown keys keep their current content.
    fn localize(&mut self, lookup: &dyn Fn(&str) -> Option<&'static str>) -> Result<(), JsValue>;

    fn set_toggle(&mut self, label: &str, aria_label: &str) -> Result<(), JsValue>;
}

pub struct LocaleSwitcher<S: LocaleStore, D: LocalizedDocument> {
    current: Locale,
    store: S,
    document: D,
}

impl<S: LocaleStore, D: LocalizedDocument> LocaleSwitcher<S, D> {
    /// Picks up the stored locale, falling back to English.
    pub fn new(store: S, document: D) -> Self {
        let current = store
            .load()
            .and_then(|code| Locale::from_code(&code))
            .unwrap_or_default();
        LocaleSwitcher {
            current,
            store,
            document,
        }
    }

    pub fn current(&self) -> Locale {
        self.current
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-applies the current locale to the page without changing it.
    pub fn apply(&mut self) -> Result<(), JsValue> {
        self.set_language(self.current)
    }

    pub fn set_language(&mut self, locale: Locale) -> Result<(), JsValue> {
        self.current = locale;
        self.store.save(locale.code())?;
        self.document.set_language_attribute(locale.code())?;
        self.document.localize(&move |key| locale.translate(key))?;
        self.document
            .set_toggle(locale.toggle_label(), locale.toggle_aria_label())
    }

    pub fn toggle_language(&mut self) -> Result<(), JsValue> {
        self.set_language(self.current.other())
    }
}

/// `window.localStorage`. Failing to write is logged and otherwise ignored,
/// since private browsing modes may refuse storage.
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl BrowserStore {
    pub fn new(storage: Option<Storage>) -> Self {
        BrowserStore { storage }
    }
}

impl LocaleStore for BrowserStore {
    fn load(&self) -> Option<String> {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
    }

    fn save(&mut self, code: &str) -> Result<(), JsValue> {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(STORAGE_KEY, code) {
                log::warn!("could not persist locale: {:?}", e);
            }
        }
        Ok(())
    }
}

pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    pub fn new(document: Document) -> Self {
        BrowserDocument { document }
    }
}

impl LocalizedDocument for BrowserDocument {
    fn set_language_attribute(&mut self, code: &str) -> Result<(), JsValue> {
        match self.document.document_element() {
            Some(root) => root.set_attribute("lang", code),
            None => Ok(()),
        }
    }

    fn localize(&mut self, lookup: &dyn Fn(&str) -> Option<&'static str>) -> Result<(), JsValue> {
        let nodes = self
            .document
            .query_selector_all(&format!("[{}]", KEY_ATTRIBUTE))?;
        for i in 0..nodes.length() {
            let element = match nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                Some(element) => element,
                None => continue,
            };
            let text = element
                .get_attribute(KEY_ATTRIBUTE)
                .and_then(|key| lookup(&key));
            if let Some(text) = text {
                element.set_inner_html(text);
            }
        }
        Ok(())
    }

    fn set_toggle(&mut self, label: &str, aria_label: &str) -> Result<(), JsValue> {
        if let Some(toggle) = self.document.get_element_by_id(TOGGLE_ID) {
            toggle.set_text_content(Some(label));
            toggle.set_attribute("aria-label", aria_label)?;
        }
        Ok(())
    }
}
