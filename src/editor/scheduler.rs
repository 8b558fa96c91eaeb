//! calloop-driven frame scheduling.
//!
//! [`EditorLoop`] owns an event loop with three registrations:
//! - a repeating frame timer that runs [`Editor::tick`]
//! - a channel of [`PointerEvent`]s fed by the host's input callbacks
//! - a channel of [`ContainerSize`] measurements, debounced before the
//!   surfaces are reallocated
//!
//! Dropping the loop (or calling [`EditorLoop::shutdown`]) removes every
//! registration, so no frame runs after teardown.

use std::time::{Duration, Instant};

use calloop::channel::{self, Channel, Sender};
use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, InsertError, LoopHandle, RegistrationToken};
use log::{debug, info, warn};

use super::core::Editor;
use super::debounce::{ContainerSize, ResizeDebouncer};
use crate::error::EditorError;
use crate::input::PointerEvent;

/// State handed to every calloop callback.
pub struct LoopData {
    pub editor: Editor,
    debouncer: ResizeDebouncer,
}

impl LoopData {
    fn frame(&mut self, now: Instant) {
        if let Some(size) = self.debouncer.ready(now) {
            debug!(
                "Applying debounced resize {}x{} @ {}",
                size.width, size.height, size.device_pixel_ratio
            );
            if let Err(err) = self
                .editor
                .resize(size.width, size.height, size.device_pixel_ratio)
            {
                warn!("Ignoring resize: {err}");
            }
        }
        self.editor.tick();
    }
}

/// Removes registrations from the loop when dropped.
struct Registrations {
    handle: LoopHandle<'static, LoopData>,
    tokens: Vec<RegistrationToken>,
}

impl Drop for Registrations {
    fn drop(&mut self) {
        for token in self.tokens.drain(..) {
            self.handle.remove(token);
        }
        debug!("Editor loop registrations removed");
    }
}

fn registration_error<S>(what: &str, err: InsertError<S>) -> EditorError {
    EditorError::Registration(format!("{what}: {}", err.error))
}

/// Editor plus the event loop that drives it.
pub struct EditorLoop {
    // Declared first so registrations are removed before the loop is dropped.
    registrations: Registrations,
    event_loop: EventLoop<'static, LoopData>,
    data: LoopData,
    frame_interval: Duration,
    pointer_tx: Sender<PointerEvent>,
    resize_tx: Sender<ContainerSize>,
}

impl EditorLoop {
    /// Registers the frame timer and input channels around `editor`.
    pub fn new(
        editor: Editor,
        frame_interval: Duration,
        resize_delay: Duration,
    ) -> Result<Self, EditorError> {
        let event_loop: EventLoop<'static, LoopData> = EventLoop::try_new()?;
        let handle = event_loop.handle();
        // Anything registered before a later failure is removed on drop.
        let mut registrations = Registrations {
            handle: handle.clone(),
            tokens: Vec::with_capacity(3),
        };

        let frame_timer = handle
            .insert_source(
                Timer::from_duration(frame_interval),
                move |_deadline, _, data: &mut LoopData| {
                    data.frame(Instant::now());
                    TimeoutAction::ToDuration(frame_interval)
                },
            )
            .map_err(|err| registration_error("frame timer", err))?;
        registrations.tokens.push(frame_timer);

        let (pointer_tx, pointer_rx): (Sender<PointerEvent>, Channel<PointerEvent>) =
            channel::channel();
        let pointer_source = handle
            .insert_source(pointer_rx, |event, _, data: &mut LoopData| {
                if let channel::Event::Msg(event) = event {
                    data.editor.pointer_event(event);
                }
            })
            .map_err(|err| registration_error("pointer channel", err))?;
        registrations.tokens.push(pointer_source);

        let (resize_tx, resize_rx): (Sender<ContainerSize>, Channel<ContainerSize>) =
            channel::channel();
        let resize_source = handle
            .insert_source(resize_rx, |event, _, data: &mut LoopData| {
                if let channel::Event::Msg(size) = event {
                    data.debouncer.observe(size, Instant::now());
                }
            })
            .map_err(|err| registration_error("resize channel", err))?;
        registrations.tokens.push(resize_source);

        info!(
            "Editor loop ready: frame every {:?}, resize debounce {:?}",
            frame_interval, resize_delay
        );

        Ok(Self {
            registrations,
            event_loop,
            data: LoopData {
                editor,
                debouncer: ResizeDebouncer::new(resize_delay),
            },
            frame_interval,
            pointer_tx,
            resize_tx,
        })
    }

    /// Sender for pointer events; may be cloned into host callbacks.
    pub fn pointer_sender(&self) -> Sender<PointerEvent> {
        self.pointer_tx.clone()
    }

    /// Sender for container-size observations.
    pub fn resize_sender(&self) -> Sender<ContainerSize> {
        self.resize_tx.clone()
    }

    pub fn editor(&self) -> &Editor {
        &self.data.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.data.editor
    }

    /// Whether a resize is waiting for its quiet period.
    pub fn resize_pending(&self) -> bool {
        self.data.debouncer.is_pending()
    }

    /// Dispatches pending events once, waiting at most `timeout`.
    pub fn dispatch(&mut self, timeout: Option<Duration>) -> Result<(), EditorError> {
        self.event_loop.dispatch(timeout, &mut self.data)?;
        Ok(())
    }

    /// Processes input already queued on the channels without waiting.
    ///
    /// A frame that is due may run in the same dispatch, so callers that need
    /// an event applied before counting frames call this first.
    pub fn flush_input(&mut self) -> Result<(), EditorError> {
        self.dispatch(Some(Duration::ZERO))
    }

    /// Dispatches until `frames` more frames have run.
    pub fn run_frames(&mut self, frames: u64) -> Result<(), EditorError> {
        let target = self.data.editor.frame_count() + frames;
        while self.data.editor.frame_count() < target {
            self.dispatch(Some(self.frame_interval))?;
        }
        Ok(())
    }

    /// Dispatches until `duration` has elapsed.
    pub fn run_for(&mut self, duration: Duration) -> Result<(), EditorError> {
        let deadline = Instant::now() + duration;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            self.dispatch(Some((deadline - now).min(self.frame_interval)))?;
        }
    }

    /// Removes all registrations and hands the editor back.
    pub fn shutdown(self) -> Editor {
        let EditorLoop {
            registrations,
            event_loop,
            data,
            ..
        } = self;
        drop(registrations);
        drop(event_loop);
        info!("Editor loop shut down after {} frames", data.editor.frame_count());
        data.editor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorOptions, EditorPhase};
    use crate::input::PointerPhase;

    fn editor_loop() -> EditorLoop {
        let editor = Editor::new(EditorOptions::default(), 64, 48, 1.0).unwrap();
        EditorLoop::new(editor, Duration::from_millis(4), Duration::from_millis(150)).unwrap()
    }

    #[test]
    fn frame_timer_ticks_editor() {
        let mut editor_loop = editor_loop();
        editor_loop.run_frames(3).unwrap();
        assert!(editor_loop.editor().frame_count() >= 3);
    }

    #[test]
    fn pointer_channel_feeds_tracker() {
        let mut editor_loop = editor_loop();
        let sender = editor_loop.pointer_sender();
        sender
            .send(PointerEvent::mouse(PointerPhase::Move, 10.0, 12.0))
            .unwrap();
        sender
            .send(PointerEvent::mouse(PointerPhase::Press, 10.0, 12.0))
            .unwrap();
        editor_loop.run_frames(3).unwrap();

        assert_eq!(editor_loop.editor().pointer().x, 10.0);
        assert_eq!(editor_loop.editor().pointer().y, 12.0);
        assert_ne!(editor_loop.editor().phase(), EditorPhase::Idle);
    }

    #[test]
    fn resize_is_debounced() {
        let mut editor_loop = editor_loop();
        let sender = editor_loop.resize_sender();
        sender.send(ContainerSize::new(80, 60, 1.0)).unwrap();
        sender.send(ContainerSize::new(100, 70, 1.0)).unwrap();
        editor_loop.run_frames(1).unwrap();
        assert_eq!(editor_loop.editor().logical_size(), (64, 48));

        editor_loop.run_for(Duration::from_millis(400)).unwrap();
        assert!(!editor_loop.resize_pending());
        assert_eq!(editor_loop.editor().logical_size(), (100, 70));
    }

    #[test]
    fn shutdown_returns_editor_and_stops_frames() {
        let mut editor_loop = editor_loop();
        editor_loop.run_frames(2).unwrap();
        let editor = editor_loop.shutdown();
        let frames = editor.frame_count();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(editor.frame_count(), frames);
        assert!(editor.mask().is_some());
    }
}
