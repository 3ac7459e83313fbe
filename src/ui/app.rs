use crate::component::{ControlId, InputEdit, RenderNode};
use crate::demo::{with_latency, Latency, Screen};
use crate::error::ErrorRegistry;
use crate::region::{Notifier, Region};
use tokio::runtime::Handle;

/// One mounted region with its title.
pub struct Pane {
    title: String,
    region: Region,
}

impl Pane {
    pub fn new(title: impl Into<String>, region: Region) -> Self {
        Self {
            title: title.into(),
            region,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut Region {
        &mut self.region
    }
}

/// A focused interactive control: which pane, and where in its tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FocusTarget {
    pub pane: usize,
    pub control: ControlId,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlKind {
    Tabs,
    Button,
    TextInput,
}

pub struct App {
    panes: Vec<Pane>,
    focus: Option<FocusTarget>,
    should_quit: bool,
    show_state: bool,
    errors: ErrorRegistry,
}

impl App {
    pub fn new(panes: Vec<Pane>, errors: ErrorRegistry) -> Self {
        Self {
            panes,
            focus: None,
            should_quit: false,
            show_state: false,
            errors,
        }
    }

    /// One pane per demo screen, all sharing `errors` and waking the host
    /// loop through `notifier`.
    pub fn for_screens(
        screens: &[Screen],
        latency: Latency,
        runtime: Handle,
        notifier: Option<Notifier>,
        errors: ErrorRegistry,
    ) -> Self {
        let panes = screens
            .iter()
            .map(|screen| {
                let provider = with_latency(screen.provider(), latency);
                let mut region = Region::new(provider, runtime.clone())
                    .with_error_registry(errors.clone());
                if let Some(notify) = &notifier {
                    region = region.with_notifier(notify.clone());
                }
                Pane::new(screen.title(), region)
            })
            .collect();
        Self::new(panes, errors)
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn pane(&self, index: usize) -> Option<&Pane> {
        self.panes.get(index)
    }

    /// Get access to the shared error registry.
    pub fn error_registry(&self) -> &ErrorRegistry {
        &self.errors
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn show_state(&self) -> bool {
        self.show_state
    }

    pub fn toggle_state(&mut self) {
        self.show_state = !self.show_state;
    }

    pub fn mount_all(&mut self) {
        for pane in &mut self.panes {
            pane.region.mount();
        }
    }

    pub fn unmount_all(&mut self) {
        for pane in &mut self.panes {
            pane.region.unmount();
        }
        self.focus = None;
    }

    pub fn refresh_all(&mut self) {
        tracing::debug!(panes = self.panes.len(), "Refreshing all regions");
        for pane in &mut self.panes {
            pane.region.refresh();
        }
    }

    /// Apply whatever provider results have arrived. Returns how many.
    pub fn poll(&mut self) -> usize {
        let applied = self
            .panes
            .iter_mut()
            .map(|pane| pane.region.poll_completions())
            .sum();
        self.ensure_focus();
        applied
    }

    /// Wait until no pane has provider work outstanding.
    pub async fn settle(&mut self) {
        for pane in &mut self.panes {
            pane.region.settle().await;
        }
        self.ensure_focus();
    }

    /// Every focusable control, pane by pane, in document order.
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        self.panes
            .iter()
            .enumerate()
            .flat_map(|(pane, p)| {
                p.region
                    .view()
                    .focusables()
                    .into_iter()
                    .map(move |control| FocusTarget { pane, control })
            })
            .collect()
    }

    pub fn focus(&self) -> Option<&FocusTarget> {
        self.focus.as_ref()
    }

    /// Keep focus on a control that still exists; otherwise move it to the
    /// first one available.
    fn ensure_focus(&mut self) {
        let targets = self.focus_targets();
        let valid = self
            .focus
            .as_ref()
            .is_some_and(|focus| targets.contains(focus));
        if !valid {
            self.focus = targets.into_iter().next();
        }
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, delta: isize) {
        let targets = self.focus_targets();
        if targets.is_empty() {
            self.focus = None;
            return;
        }
        let len = targets.len() as isize;
        let next = match self
            .focus
            .as_ref()
            .and_then(|focus| targets.iter().position(|t| t == focus))
        {
            Some(current) => (current as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.focus = targets.into_iter().nth(next as usize);
    }

    pub fn focused_node(&self) -> Option<&RenderNode> {
        let focus = self.focus.as_ref()?;
        self.panes
            .get(focus.pane)?
            .region
            .view()
            .find(&focus.control)
    }

    pub fn focused_kind(&self) -> Option<ControlKind> {
        match self.focused_node()? {
            RenderNode::Tabs { .. } => Some(ControlKind::Tabs),
            RenderNode::Button { .. } => Some(ControlKind::Button),
            RenderNode::TextInput { .. } => Some(ControlKind::TextInput),
            _ => None,
        }
    }

    fn focused_region(&mut self) -> Option<(&mut Region, ControlId)> {
        let focus = self.focus.clone()?;
        let pane = self.panes.get_mut(focus.pane)?;
        Some((&mut pane.region, focus.control))
    }

    pub fn select_tab(&mut self, index: usize) -> bool {
        match self.focused_region() {
            Some((region, id)) => region.select_tab(&id, index),
            None => false,
        }
    }

    /// Move the focused tab selection by `delta`, clamped to the tab range.
    pub fn step_tab(&mut self, delta: isize) -> bool {
        let Some(RenderNode::Tabs {
            titles, selected, ..
        }) = self.focused_node()
        else {
            return false;
        };
        if titles.is_empty() {
            return false;
        }
        let last = titles.len() as isize - 1;
        let next = (*selected as isize + delta).clamp(0, last) as usize;
        if next == *selected {
            return false;
        }
        self.select_tab(next)
    }

    pub fn press(&mut self) -> bool {
        match self.focused_region() {
            Some((region, id)) => region.press(&id),
            None => false,
        }
    }

    pub fn edit(&mut self, edit: InputEdit) -> bool {
        match self.focused_region() {
            Some((region, id)) => region.edit_input(&id, edit),
            None => false,
        }
    }

    pub fn submit(&mut self) -> bool {
        match self.focused_region() {
            Some((region, id)) => region.submit_input(&id),
            None => false,
        }
    }

    /// Enter on the focused control: press a button, submit an input.
    pub fn activate(&mut self) -> bool {
        match self.focused_kind() {
            Some(ControlKind::Button) => self.press(),
            Some(ControlKind::TextInput) => self.submit(),
            Some(ControlKind::Tabs) | None => false,
        }
    }
}
