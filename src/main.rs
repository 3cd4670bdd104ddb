use anyhow::Result;
use glam::Vec2;
use log::info;
use std::cell::Cell;
use std::rc::Rc;
use unified_input::key::{keycode_from_winit, pointer_button_from_winit};
use unified_input::{
    keycodes, FrameLoop, GamepadButton, GilrsBackend, InputOptions, InputSystem, PlayerSlot,
    UserInputAxis,
};
use winit::{
    event::{ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Fullscreen, WindowBuilder},
};

/// Pixel deltas (touchpads) are reported in lines like wheel notches
const PIXELS_PER_LINE: f32 = 20.0;

/// How often the demo logs the merged axes
const REPORT_EVERY_FRAMES: u64 = 120;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting unified input demo...");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Unified Input")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut input = InputSystem::new();
    input.enable_user_input(InputOptions::default().with_use_capture(true));

    if input.options().use_capture {
        // Keep pointer events flowing to the window while the cursor is near its edge
        if let Err(err) = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        {
            log::warn!("Could not capture the cursor: {}", err);
        }
    }

    let mut gamepads = GilrsBackend::new();
    gamepads.announce_connected(&mut input);

    let quit = Rc::new(Cell::new(false));
    let pause = Rc::new(Cell::new(false));
    {
        let quit = quit.clone();
        input.on_keyboard_press(keycodes::ESCAPE, move || quit.set(true));
    }
    for player in PlayerSlot::ALL {
        let pause = pause.clone();
        input.on_gamepad_button_press(
            GamepadButton::Start,
            move || pause.set(true),
            player,
        );
    }
    {
        let pause = pause.clone();
        input.on_keyboard_press(keycodes::F1, move || pause.set(true));
    }

    let mut frame_loop = FrameLoop::new();
    let mut last_cursor: Option<Vec2> = None;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    input.disable_user_input();
                    elwt.exit();
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(code),
                            state,
                            repeat,
                            ..
                        },
                    ..
                } => {
                    let consumed = match (keycode_from_winit(code), state) {
                        (Some(keycode), ElementState::Pressed) if !repeat => input.key_down(keycode),
                        (Some(keycode), ElementState::Released) => input.key_up(keycode),
                        _ => false,
                    };
                    // Host default: F11 toggles fullscreen unless input consumed the key
                    if !consumed && code == KeyCode::F11 && state == ElementState::Pressed && !repeat {
                        let fullscreen = match window.fullscreen() {
                            Some(_) => None,
                            None => Some(Fullscreen::Borderless(None)),
                        };
                        window.set_fullscreen(fullscreen);
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    let button = pointer_button_from_winit(button);
                    match state {
                        ElementState::Pressed => input.pointer_down(button),
                        ElementState::Released => input.pointer_up(button),
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let client = Vec2::new(position.x as f32, position.y as f32);
                    let movement = last_cursor.map(|last| client - last).unwrap_or(Vec2::ZERO);
                    last_cursor = Some(client);
                    input.pointer_move(client, movement);
                }
                WindowEvent::CursorLeft { .. } => {
                    last_cursor = None;
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    // Positive is toward the user, matching screen-space Y
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => -y,
                        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / PIXELS_PER_LINE,
                    };
                    input.pointer_wheel(lines);
                }
                WindowEvent::RedrawRequested => {
                    gamepads.pump(&mut input);

                    if pause.replace(false) {
                        frame_loop.toggle_pause();
                    }
                    let advancing = frame_loop.begin_frame();
                    frame_loop.end_frame(&mut input);

                    if advancing && frame_loop.frame_count() % REPORT_EVERY_FRAMES == 0 {
                        report(&input);
                    }

                    if quit.get() {
                        info!("Escape pressed, shutting down...");
                        input.disable_user_input();
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

fn report(input: &InputSystem) {
    for player in PlayerSlot::ALL {
        let axes = input.snapshot().player(player);
        let moving = [axes.horizontal, axes.vertical, axes.mouse_x, axes.mouse_y]
            .iter()
            .any(|v| *v != 0.0);
        if moving || input.gamepad_type(player).is_some() {
            info!(
                "Player {} [{:?}] move=({:.2}, {:.2}) look=({:.2}, {:.2})",
                player.number(),
                input.gamepad_type(player),
                axes.horizontal,
                axes.vertical,
                axes.mouse_x,
                axes.mouse_y
            );
        }
    }
    log::debug!(
        "Wheel {:.2}, pointer ({:.0}, {:.0})",
        input.user_input(UserInputAxis::Wheel, PlayerSlot::One),
        input.user_input(UserInputAxis::ClientX, PlayerSlot::One),
        input.user_input(UserInputAxis::ClientY, PlayerSlot::One)
    );
}
