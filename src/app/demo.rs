use serde::Serialize;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::geometry::{Bounds, ScreenPoint, Size};
use crate::input::{
    invert_text_area_traversal, resolve_text_area_key, Key, KeyModifiers, KeyStroke,
    TextAreaKeyBindings, TextAreaKeyOutcome,
};
use crate::popup::{DismissReason, PopupWindow};
use crate::state::StateTransition;
use crate::ui::{ElementId, Scene, SceneError, Toolkit};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoStep {
    pub action: &'static str,
    pub visible: bool,
    pub dismissed_by: Vec<DismissReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoReport {
    pub steps: Vec<DemoStep>,
    pub transitions: Vec<StateTransition>,
    pub surfaces_created: usize,
    pub surfaces_destroyed: usize,
    pub leaked_listeners: usize,
}

/// A window with an "SMS" button whose popup holds a phone field, a message
/// area and a send button.
struct SmsWindow {
    scene: Scene,
    window: ElementId,
    sms_button: ElementId,
    phone_field: ElementId,
    message_area: ElementId,
    message_bindings: TextAreaKeyBindings,
    popup: PopupWindow,
    invoker_gap: i32,
}

impl SmsWindow {
    fn build(config: &AppConfig) -> AppResult<Self> {
        let mut scene = Scene::new();
        let window = scene.add_window("popup window example", Bounds::new(200, 150, 360, 320));
        let sms_button = scene.add_widget(window, "SMS", Bounds::new(30, 30, 300, 40))?;

        let content = scene.add_detached_widget("sms popup", Bounds::new(0, 0, 240, 210));
        scene.add_widget(content, "Phone:", Bounds::new(8, 8, 224, 18))?;
        let phone_field = scene.add_widget(content, "phone", Bounds::new(8, 28, 224, 24))?;
        scene.add_widget(content, "Message:", Bounds::new(8, 58, 224, 18))?;
        let message_area = scene.add_widget(content, "message", Bounds::new(8, 78, 224, 84))?;
        scene.add_widget(content, "Send", Bounds::new(160, 172, 72, 28))?;
        scene.set_preferred_size(content, Size::new(240, 210))?;

        let mut message_bindings = TextAreaKeyBindings::default();
        invert_text_area_traversal(&mut message_bindings);

        scene.activate(window)?;
        Ok(Self {
            scene,
            window,
            sms_button,
            phone_field,
            message_area,
            message_bindings,
            popup: PopupWindow::with_options(content, config.popup.options()),
            invoker_gap: config.popup.invoker_gap,
        })
    }

    fn press(&mut self, element: ElementId) -> AppResult<Vec<DismissReason>> {
        let point = self.center_of(element)?;
        self.press_at(point)
    }

    /// Presses at `point`, dispatches queued events to the popup, then runs
    /// the button's own action, in that order.
    fn press_at(&mut self, point: ScreenPoint) -> AppResult<Vec<DismissReason>> {
        let pressed = self.scene.press_at(point);
        let reasons = self.pump();
        if pressed == Some(self.sms_button) {
            self.open_popup()?;
        }
        Ok(reasons)
    }

    fn open_popup(&mut self) -> AppResult<()> {
        let height = self
            .scene
            .bounds(self.sms_button)
            .ok_or(SceneError::UnknownElement(self.sms_button))?
            .height;
        let dy = i32::try_from(height)
            .unwrap_or(i32::MAX)
            .saturating_add(self.invoker_gap);
        self.popup.show(&mut self.scene, Some(self.sms_button), 0, dy);
        Ok(())
    }

    fn pump(&mut self) -> Vec<DismissReason> {
        let mut reasons = Vec::new();
        loop {
            let deliveries = self.scene.take_deliveries();
            if deliveries.is_empty() {
                return reasons;
            }
            for delivery in deliveries {
                if let Some(reason) = self.popup.handle_delivery(&mut self.scene, &delivery) {
                    tracing::info!(?reason, "popup dismissed");
                    reasons.push(reason);
                }
            }
        }
    }

    fn center_of(&self, element: ElementId) -> AppResult<ScreenPoint> {
        let origin = self
            .scene
            .location_on_screen(element)
            .ok_or(SceneError::UnknownElement(element))?;
        let size = self
            .scene
            .bounds(element)
            .ok_or(SceneError::UnknownElement(element))?
            .size();
        let half = |extent: u32| i32::try_from(extent / 2).unwrap_or(i32::MAX);
        Ok(origin.offset(half(size.width), half(size.height)))
    }
}

/// Scripted session: open the popup, work inside it, then dismiss it with
/// each trigger in turn.
pub fn run_demo(config: &AppConfig) -> AppResult<DemoReport> {
    let mut demo = SmsWindow::build(config)?;
    let mut steps = Vec::new();
    let mut record = |action: &'static str, popup: &PopupWindow, dismissed_by| {
        tracing::info!(action, visible = popup.is_visible(), "demo step");
        steps.push(DemoStep {
            action,
            visible: popup.is_visible(),
            dismissed_by,
        });
    };

    let reasons = demo.press(demo.sms_button)?;
    record("press sms button", &demo.popup, reasons);

    let focused = demo.popup.request_focus(&mut demo.scene, demo.phone_field);
    tracing::info!(focused, "focus forwarded to phone field");
    let reasons = demo.pump();
    record("focus phone field", &demo.popup, reasons);

    let reasons = demo.press(demo.message_area)?;
    record("press message area", &demo.popup, reasons);

    for (label, stroke) in [
        ("tab", KeyStroke::new(Key::Tab, KeyModifiers::NONE)),
        ("ctrl+tab", KeyStroke::new(Key::Tab, KeyModifiers::CTRL)),
    ] {
        let outcome = resolve_text_area_key(&demo.message_bindings, stroke);
        if outcome == TextAreaKeyOutcome::FocusNext {
            demo.popup.request_focus(&mut demo.scene, demo.phone_field);
        }
        tracing::info!(key = label, ?outcome, "message area key");
    }
    let reasons = demo.pump();
    record("traverse message area keys", &demo.popup, reasons);

    let reasons = demo.press(demo.sms_button)?;
    record("press sms button again", &demo.popup, reasons);

    let window_origin = demo
        .scene
        .location_on_screen(demo.window)
        .ok_or(SceneError::UnknownElement(demo.window))?;
    let reasons = demo.press_at(window_origin.offset(20, 300))?;
    record("press empty window area", &demo.popup, reasons);

    let reasons = demo.press(demo.sms_button)?;
    record("reopen popup", &demo.popup, reasons);

    let other = demo
        .scene
        .add_window("another application", Bounds::new(700, 150, 200, 200));
    demo.scene.activate(other)?;
    let reasons = demo.pump();
    record("activate another window", &demo.popup, reasons);

    demo.scene.activate(demo.window)?;
    demo.open_popup()?;
    demo.pump();
    demo.scene.remove(demo.sms_button)?;
    let reasons = demo.pump();
    record("remove sms button", &demo.popup, reasons);

    Ok(DemoReport {
        steps,
        transitions: demo.popup.history().to_vec(),
        surfaces_created: demo.scene.surfaces_created(),
        surfaces_destroyed: demo.scene.surfaces_destroyed(),
        leaked_listeners: demo.scene.registry().count_for(demo.popup.id()),
    })
}
