//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Hand the screen body to its layout function

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ScreenView, UIViewModel};

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output with `print!`. Does not clear the screen; every
/// component pads its rows to the pane width instead.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    match &vm.body {
        ScreenView::Search(view) => components::render_search_screen(vm, view, theme, cols, rows),
        ScreenView::Results(view) => components::render_results_screen(vm, view, theme, cols, rows),
        ScreenView::Details(view) => components::render_details_screen(vm, view, theme, cols, rows),
    }
}
