//! Idle Store entry point
//!
//! On the web, hydrates the game from LocalStorage and exposes debug hooks on
//! `window.__idle`. Natively, hydrates from a JSON save file and logs the roster.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use idle_store::Game;
    use idle_store::platform::{LocalStorage, expose_debug_namespace};

    /// Name of the debug namespace on `window`
    const DEBUG_NAMESPACE: &str = "__idle";

    thread_local! {
        // Keeps bindings alive for the page lifetime
        static GAME: RefCell<Option<Game>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Idle Store starting...");

        let storage = match LocalStorage::new() {
            Ok(storage) => Rc::new(storage),
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let game = match Game::start(storage) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Failed to start game: {}", e);
                return;
            }
        };

        if let Some(registry) = game.context().debug() {
            if let Err(e) = expose_debug_namespace(registry, DEBUG_NAMESPACE) {
                log::warn!("Debug hooks not exposed: {}", e);
            }
        }

        GAME.with(|g| *g.borrow_mut() = Some(game));
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Idle Store (native) starting...");

    if let Err(e) = run_native() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Save file path, overridable with `IDLE_STORE_SAVE`
#[cfg(not(target_arch = "wasm32"))]
fn run_native() -> idle_store::Result<()> {
    use std::rc::Rc;

    use idle_store::Game;
    use idle_store::platform::FileStorage;

    let path = std::env::var("IDLE_STORE_SAVE").unwrap_or_else(|_| "idle_save.json".to_string());
    let storage = Rc::new(FileStorage::open(&path)?);
    let game = Game::start(storage)?;

    for worker in game.roster().iter() {
        let price = worker.upgrade_price()?;
        log::info!(
            "{}: {} {} (next {}, influence x{})",
            worker.id(),
            worker.count(),
            worker.display_name(),
            price,
            worker.upgrade_influence(),
        );
    }
    Ok(())
}
