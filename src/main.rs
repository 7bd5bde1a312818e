mod chain;
mod config;
mod graphics;
mod layout;
mod life;
mod map_view;
mod renderer;
mod scheduler;
mod spawn;
mod surface;
mod tiles;

use std::path::Path;
use std::time::Instant;

use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use crate::chain::ChainClient;
use crate::config::GardenConfig;
use crate::graphics::FrameSurface;
use crate::layout::Layout;
use crate::life::Grid;
use crate::map_view::MapView;
use crate::renderer::GardenRenderer;
use crate::scheduler::FrameScheduler;
use crate::tiles::MemoryTileSource;

const DEFAULT_WIDTH: f64 = 1280.0;
const DEFAULT_HEIGHT: f64 = 720.0;
const PAN_STEP: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Page {
    Garden,
    Map,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = GardenConfig::load(Path::new("garden.json"));
    log::debug!("config: {:?}", config);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Garden of Eden")
        .with_inner_size(LogicalSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT))
        .with_resizable(true)
        .build(&event_loop)?;

    let initial: LogicalSize<f64> = window.inner_size().to_logical(window.scale_factor());
    let mut layout = Layout::compute(
        initial.width as u32,
        initial.height as u32,
        config.cell_size,
        window.scale_factor(),
    );

    // The animation is decorative: if the frame buffer cannot be created we
    // keep the window up and simply show nothing.
    let mut frame_surface = match FrameSurface::new(&window, &layout) {
        Ok(surface) => Some(surface),
        Err(err) => {
            log::error!("no drawable surface, animation disabled: {}", err);
            None
        }
    };

    let mut rng = rand::rng();
    let mut grid = Grid::new(layout.cols, layout.rows);
    grid.seed_random(config.density, &mut rng);
    log::info!(
        "seeded {}x{} grid, {} live cells",
        grid.cols(),
        grid.rows(),
        grid.live_count()
    );

    let renderer = GardenRenderer::new(config.cell_size);
    let mut scheduler = FrameScheduler::new(config.target_fps);
    let mut map = MapView::new();
    // The HTTP tile transport and the wallet session are wired in by the
    // embedding deployment; standalone runs get an empty tile set and no
    // chain client.
    let mut tile_source = MemoryTileSource::default();
    let mut chain_client: Option<Box<dyn ChainClient>> = None;

    let mut page = Page::Garden;
    let mut redraw_requested = true;
    let start = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    scheduler.stop();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let logical: LogicalSize<f64> = size.to_logical(window.scale_factor());
                    layout = Layout::compute(
                        logical.width as u32,
                        logical.height as u32,
                        config.cell_size,
                        window.scale_factor(),
                    );
                    // Buffers are never migrated across sizes: every resize
                    // reallocates and reseeds.
                    grid = Grid::new(layout.cols, layout.rows);
                    grid.seed_random(config.density, &mut rng);
                    if let Some(surface) = frame_surface.as_mut() {
                        surface.resize(size.width, size.height, &layout);
                    }
                    // Paint right away so the window is never blank or
                    // stale between the resize and the next tick.
                    redraw_requested = true;
                }
                WindowEvent::ScaleFactorChanged {
                    scale_factor,
                    new_inner_size,
                } => {
                    let logical: LogicalSize<f64> = new_inner_size.to_logical(scale_factor);
                    layout = Layout::compute(
                        logical.width as u32,
                        logical.height as u32,
                        config.cell_size,
                        scale_factor,
                    );
                    grid = Grid::new(layout.cols, layout.rows);
                    grid.seed_random(config.density, &mut rng);
                    if let Some(surface) = frame_surface.as_mut() {
                        surface.resize(new_inner_size.width, new_inner_size.height, &layout);
                    }
                    redraw_requested = true;
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => match key {
                    VirtualKeyCode::Escape => {
                        scheduler.stop();
                        *control_flow = ControlFlow::Exit;
                    }
                    VirtualKeyCode::Tab => {
                        page = match page {
                            Page::Garden => {
                                scheduler.stop();
                                Page::Map
                            }
                            Page::Map => {
                                scheduler.resume();
                                Page::Garden
                            }
                        };
                        log::debug!("page: {:?}", page);
                        redraw_requested = true;
                    }
                    VirtualKeyCode::Equals | VirtualKeyCode::NumpadAdd if page == Page::Map => {
                        map.zoom_in();
                        redraw_requested = true;
                    }
                    VirtualKeyCode::Minus | VirtualKeyCode::NumpadSubtract
                        if page == Page::Map => {
                        map.zoom_out();
                        redraw_requested = true;
                    }
                    VirtualKeyCode::Left if page == Page::Map => {
                        map.pan(-PAN_STEP, 0.0);
                        redraw_requested = true;
                    }
                    VirtualKeyCode::Right if page == Page::Map => {
                        map.pan(PAN_STEP, 0.0);
                        redraw_requested = true;
                    }
                    VirtualKeyCode::Up if page == Page::Map => {
                        map.pan(0.0, -PAN_STEP);
                        redraw_requested = true;
                    }
                    VirtualKeyCode::Down if page == Page::Map => {
                        map.pan(0.0, PAN_STEP);
                        redraw_requested = true;
                    }
                    VirtualKeyCode::S if page == Page::Map => match chain_client.as_mut() {
                        Some(client) => {
                            let _ = spawn::spawn_player(client.as_mut(), &mut rng);
                        }
                        None => log::warn!("no chain client connected, cannot spawn"),
                    },
                    _ => {}
                },
                _ => {}
            },
            Event::MainEventsCleared => {
                let Some(surface) = frame_surface.as_mut() else {
                    return;
                };

                if page == Page::Garden {
                    let now_ms = start.elapsed().as_secs_f64() * 1000.0;
                    if scheduler.should_tick(now_ms) {
                        grid.step();
                        redraw_requested = true;
                    }
                }

                if redraw_requested {
                    match page {
                        Page::Garden => renderer.render(&grid, &mut surface.raster()),
                        Page::Map => map.render(&mut surface.raster(), &mut tile_source),
                    }
                    if let Err(err) = surface.present() {
                        log::error!("present failed, animation disabled: {}", err);
                        scheduler.stop();
                        frame_surface = None;
                    }
                    redraw_requested = false;
                }
            }
            _ => {}
        }
    });
}
