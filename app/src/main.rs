mod app;
mod bootstrap;
mod config;
mod error;
mod mount;
mod nodes;
mod session;

use crate::mount::CONTAINER_ID;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context as _;
    use eframe::egui;

    use crate::mount::Surface;

    env_logger::init();
    let config = config::load_config();

    let container = Surface::from_layout(&config.layout)
        .find(CONTAINER_ID)
        .inspect_err(|e| log::error!("{}", e))
        .context("Cannot start the editor")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.as_str())
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };
    let editor_options = config.editor.clone();

    // Setup failures end the app without a retry.
    if let Err(e) = eframe::run_native(
        &config.window.title,
        native_options,
        Box::new(move |cc| {
            let session = bootstrap::create_editor(container, &editor_options)?;
            Ok(Box::new(app::VidixyApp::new(cc, session)))
        }),
    ) {
        log::error!("Editor setup failed: {}", e);
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    let config = config::load_config();

    wasm_bindgen_futures::spawn_local(async move {
        let found = mount::resolve(CONTAINER_ID, |id| {
            web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(id))
                .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        });
        let (container, canvas) = match found {
            Ok(found) => found,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let editor_options = config.editor.clone();
        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |cc| {
                    let session = bootstrap::create_editor(container, &editor_options)?;
                    Ok(Box::new(app::VidixyApp::new(cc, session)))
                }),
            )
            .await;
        if let Err(e) = result {
            log::error!("Editor setup failed: {:?}", e);
        }
    });
}
