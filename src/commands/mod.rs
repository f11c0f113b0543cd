//! Backend Command Wrappers
//!
//! Frontend bindings to the menu service, resolved from the page
//! environment (`window.ENV`).

mod menu;

use std::cell::RefCell;
use std::rc::Rc;

use menu_ordering::config::DEFAULT_API_URL;
use menu_ordering::{ApiConfig, HttpMenuApi, MenuApi, OrderingSyncGateway};
use wasm_bindgen::JsValue;

pub use menu::*;

/// Local storage key holding the operator's bearer token
pub const TOKEN_STORAGE_KEY: &str = "menu_admin_token";

pub type Gateway = OrderingSyncGateway<Rc<dyn MenuApi>>;

thread_local! {
    static GATEWAY: RefCell<Option<Gateway>> = const { RefCell::new(None) };
}

/// Values injected by the hosting page
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    pub api_url: String,
    pub token: Option<String>,
    /// Serve a built-in sample menu instead of calling the service
    pub demo: bool,
}

fn env_value(key: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    let env = js_sys::Reflect::get(&window, &JsValue::from_str("ENV")).ok()?;
    if env.is_undefined() || env.is_null() {
        return None;
    }
    let value = js_sys::Reflect::get(&env, &JsValue::from_str(key)).ok()?;
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

fn stored_token() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(TOKEN_STORAGE_KEY)
        .ok()?
}

impl EnvConfig {
    pub fn load() -> Self {
        let api_url = env_value("API_URL")
            .or_else(|| env_value("api_url"))
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let demo = env_value("DEMO").is_some_and(|v| v.is_truthy());
        Self {
            api_url,
            token: stored_token(),
            demo,
        }
    }

    pub fn api_config(&self) -> ApiConfig {
        let config = ApiConfig::new(self.api_url.clone());
        match &self.token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }
}

fn build_gateway() -> Result<Gateway, String> {
    let env = EnvConfig::load();
    let api: Rc<dyn MenuApi> = if env.demo {
        log::info!("Using the built-in demo menu");
        Rc::new(menu::demo_api())
    } else {
        log::info!("Using menu service at {}", env.api_url);
        Rc::new(HttpMenuApi::new(env.api_config()).map_err(|e| e.to_string())?)
    };
    Ok(OrderingSyncGateway::new(api))
}

/// Shared gateway, built on first use
pub fn gateway() -> Result<Gateway, String> {
    GATEWAY.with(|cell| {
        if let Some(gateway) = cell.borrow().as_ref() {
            return Ok(gateway.clone());
        }
        let gateway = build_gateway()?;
        *cell.borrow_mut() = Some(gateway.clone());
        Ok(gateway)
    })
}

