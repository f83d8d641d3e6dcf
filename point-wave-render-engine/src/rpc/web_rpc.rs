use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::engine::wave::frame_updater::{WaveClock, WaveSurface};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource queueing messages for the host page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Notifications waiting for the next flush.
    pub fn queued_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage bridge to the hosting page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not registered");
        return;
    };

    // Shared between the JS callback and the Bevy schedule.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();
    let own_window = window.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Messages posted by this window are our own notifications.
        if event
            .source()
            .is_some_and(|source| js_sys::Object::is(&source, &own_window))
        {
            return;
        }

        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Hand ownership to JS so the callback outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Everything a request handler may read or change.
pub struct RpcContext<'a> {
    pub fps: Option<f64>,
    pub clock: &'a WaveClock,
    pub surface: Option<&'a WaveSurface>,
    pub controls: &'a mut OrbitControls,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    clock: Res<WaveClock>,
    surface: Option<Res<WaveSurface>>,
    mut controls: ResMut<OrbitControls>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let mut context = RpcContext {
                    fps: smoothed_fps(&diagnostics),
                    clock: &clock,
                    surface: surface.as_deref(),
                    controls: &mut controls,
                };
                if let Some(response) = handle_rpc_request(&request, &mut context) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
///
/// Notifications (no id) are executed but never answered.
pub fn handle_rpc_request(request: &RpcRequest, context: &mut RpcContext) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "get_fps" => handle_get_fps(context),
        "get_wave_state" => handle_get_wave_state(context),
        "set_auto_rotate" => handle_set_auto_rotate(&request.params, context),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_get_fps(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "fps": context.fps.unwrap_or(0.0) as f32
    }))
}

fn handle_get_wave_state(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let points = context
        .surface
        .and_then(WaveSurface::buffer)
        .map(|buffer| buffer.point_count())
        .unwrap_or(0);

    Ok(serde_json::json!({
        "tick": context.clock.tick(),
        "tick_step": context.clock.step(),
        "frames": context.clock.frames(),
        "surface_available": context.surface.is_some(),
        "points": points,
        "auto_rotate": context.controls.auto_rotate,
        "auto_rotate_speed": context.controls.auto_rotate_speed,
    }))
}

fn handle_set_auto_rotate(
    params: &serde_json::Value,
    context: &mut RpcContext,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct AutoRotateParams {
        enabled: Option<bool>,
        speed: Option<f32>,
    }

    let parsed = serde_json::from_value::<AutoRotateParams>(params.clone()).map_err(|_| {
        RpcError::invalid_params("Expected optional 'enabled' (bool) and 'speed' (number)")
    })?;

    if parsed.enabled.is_none() && parsed.speed.is_none() {
        return Err(RpcError::invalid_params(
            "Provide at least one of 'enabled' or 'speed'",
        ));
    }

    if parsed.speed.is_some_and(|speed| !speed.is_finite()) {
        return Err(RpcError::invalid_params("'speed' must be finite"));
    }

    context.controls.set_auto_rotate(parsed.enabled, parsed.speed);
    info!(
        "Auto-rotate set to {} at speed {}",
        context.controls.auto_rotate, context.controls.auto_rotate_speed
    );

    Ok(serde_json::json!({
        "success": true,
        "auto_rotate": context.controls.auto_rotate,
        "auto_rotate_speed": context.controls.auto_rotate_speed,
    }))
}

/// Create standardised error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Notifications first, then responses.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// The window to post to. A top-level page is its own parent, and posting to
/// it would feed our notifications back into the listener.
#[cfg(any(target_arch = "wasm32", test))]
fn host_window<W: PartialEq>(own: &W, parent: Option<W>) -> Option<W> {
    parent.filter(|parent| parent != own)
}

/// Post a serialised message to the parent window. Nothing is sent when the
/// app is not embedded in a frame.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = window() else {
            error!("Window object not available");
            return;
        };
        let Some(parent) = host_window(&window, window.parent().ok().flatten()) else {
            return;
        };

        match serde_json::to_string(message) {
            Ok(json) => {
                if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                    error!("Failed to send message to host page: {:?}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No host page outside the browser.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}
