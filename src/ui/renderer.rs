//! Top-level rendering coordinator.
//!
//! Rendering is two steps: `AppState` is turned into a [`UIViewModel`], and
//! the view model is drawn by the components. Nothing here mutates state.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI for a `rows` x `cols` pane to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme) {
    let _span = tracing::trace_span!("render", rows = vm.rows, cols = vm.cols).entered();
    components::render_layout(vm, theme);
}
