//! Browser glue: builds the page, wires `keydown` into the session and runs
//! the `requestAnimationFrame` loop. All state lives in one thread-local
//! [`App`]; the key closure and the frame closure are its only mutators.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, KeyboardEvent, window};

use crate::config::TypewriterConfig;
use crate::driver::AnimationDriver;
use crate::error::TypewriterError;
use crate::input::Key;
use crate::session::Session;

mod audio;
mod dom;

pub use audio::WebAudio;
pub use dom::DomHost;

pub const DISPLAY_ID: &str = "text-display";
const STYLE_ID: &str = "typewriter-style";

const DISPLAY_STYLE: &str = "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); \
white-space:nowrap; font-family:monospace; line-height:1; user-select:none;";

const ANIMATION_CSS: &str = "
#text-display.jump { animation: tw-jump 0.6s ease-out; }
#text-display.pop { animation: tw-pop 0.45s ease-out; }
#text-display.launch-rumble { animation: tw-rumble 0.08s linear infinite; }
#text-display.launch-liftoff { transition: transform 2.3s ease-in; transform: translate(-50%, -300vh); }
@keyframes tw-jump { 0%,100% { transform: translate(-50%,-50%); } 40% { transform: translate(-50%,-80%); } }
@keyframes tw-pop { 0% { transform: translate(-50%,-50%) scale(1); } 50% { transform: translate(-50%,-50%) scale(1.25); } 100% { transform: translate(-50%,-50%) scale(1); } }
@keyframes tw-rumble { 0%,100% { transform: translate(-50%,-50%); } 25% { transform: translate(-51%,-49%); } 75% { transform: translate(-49%,-51%); } }
";

struct App {
    session: Session<Option<HtmlElement>>,
    host: DomHost,
    driver: AnimationDriver,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub fn start_typewriter_mode(config: TypewriterConfig) -> Result<(), JsValue> {
    config.validate()?;
    crate::logging::init(config.log_level());

    if APP.with(|app| app.borrow().is_some()) {
        tracing::warn!("typewriter already running");
        return Ok(());
    }

    let win = window().ok_or(TypewriterError::NoWindow)?;
    let doc = win.document().ok_or(TypewriterError::NoDocument)?;
    let body = doc.body().ok_or(TypewriterError::MissingElement("body"))?;

    ensure_stylesheet(&doc)?;
    let display = ensure_display(&doc)?;

    // Make the body focusable so key events arrive without a click.
    body.set_tab_index(-1);
    let _ = body.focus();

    let audio = WebAudio::new();
    audio.load_all(&win);

    let mut host = DomHost::new(win, doc.clone(), display, audio);
    let mut session = Session::new(config);
    session.refresh_display(&mut host);

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            session,
            host,
            driver: AnimationDriver::new(),
        });
    });

    install_keyboard(&doc)?;
    start_animation_loop();
    tracing::info!("typewriter started");
    Ok(())
}

/// Blank page: text, effects, timers and particles.
pub fn reset() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            app.session.reset(&mut app.host);
        }
    });
}

fn ensure_display(doc: &Document) -> Result<HtmlElement, TypewriterError> {
    if let Some(el) = doc.get_element_by_id(DISPLAY_ID) {
        return Ok(el.dyn_into::<HtmlElement>().map_err(JsValue::from)?);
    }
    let body = doc.body().ok_or(TypewriterError::MissingElement("body"))?;
    let el: HtmlElement = doc
        .create_element("div")?
        .dyn_into()
        .map_err(JsValue::from)?;
    el.set_id(DISPLAY_ID);
    el.set_attribute("style", DISPLAY_STYLE)?;
    body.append_child(&el)?;
    Ok(el)
}

fn ensure_stylesheet(doc: &Document) -> Result<(), TypewriterError> {
    if doc.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let head = doc.head().ok_or(TypewriterError::MissingElement("head"))?;
    let style = doc.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(ANIMATION_CSS));
    head.append_child(&style)?;
    Ok(())
}

fn install_keyboard(doc: &Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
        // Leave browser shortcuts (reload, devtools) alone.
        if evt.ctrl_key() || evt.meta_key() || evt.alt_key() {
            return;
        }
        evt.prevent_default();
        let key = Key::from_key_name(&evt.key());
        let now = crate::performance_now();
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                let outcome = app.session.handle_key(key, now, &mut app.host);
                tracing::trace!(?key, ?outcome, "key handled");
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_animation_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                app.driver.tick(&mut app.session, ts, &mut app.host);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
