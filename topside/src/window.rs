//! Window bootstrap: geometry, flags and what closing the window means.

use eframe::NativeOptions;

pub const WINDOW_TITLE: &str = "ROV topside";
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 720.0];

/// What to do once the last window is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPolicy {
    /// Exit the process.
    Quit,
    /// Stay alive in the dock; the close is turned into a minimize so the app
    /// can be brought back from there.
    StayResident,
}

impl ShutdownPolicy {
    pub fn for_os(os: &str) -> Self {
        if os == "macos" {
            ShutdownPolicy::StayResident
        } else {
            ShutdownPolicy::Quit
        }
    }

    pub fn current() -> Self {
        Self::for_os(std::env::consts::OS)
    }
}

/// Fixed 1280×720 decorated window that can be resized, maximized and made
/// full screen.
pub fn native_options() -> NativeOptions {
    NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_title(WINDOW_TITLE)
            .with_decorations(true)
            .with_resizable(true)
            .with_maximize_button(true),
        // the console's own theme wins over the desktop's light/dark setting
        follow_system_theme: false,
        ..Default::default()
    }
}

/// Apply the shutdown policy to a pending close request.
pub fn handle_close_request(ctx: &egui::Context, policy: ShutdownPolicy) {
    if !ctx.input(|i| i.viewport().close_requested()) {
        return;
    }
    if policy == ShutdownPolicy::StayResident {
        tracing::debug!("close requested, staying resident");
        ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
    } else {
        tracing::info!("window closed, exiting");
    }
}

/// Toggle full screen.
pub fn toggle_fullscreen(ctx: &egui::Context) {
    let fullscreen = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(!fullscreen));
}

/// F11 toggles full screen.
pub fn handle_fullscreen_key(ctx: &egui::Context) {
    if ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::F11)) {
        toggle_fullscreen(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_policy() {
        assert_eq!(ShutdownPolicy::for_os("macos"), ShutdownPolicy::StayResident);
        assert_eq!(ShutdownPolicy::for_os("linux"), ShutdownPolicy::Quit);
        assert_eq!(ShutdownPolicy::for_os("windows"), ShutdownPolicy::Quit);
    }

    #[test]
    fn test_native_options() {
        let options = native_options();
        let viewport = &options.viewport;
        assert_eq!(viewport.inner_size, Some(egui::vec2(1280.0, 720.0)));
        assert_eq!(viewport.decorations, Some(true));
        assert_eq!(viewport.resizable, Some(true));
        assert_eq!(viewport.maximize_button, Some(true));
    }
}
