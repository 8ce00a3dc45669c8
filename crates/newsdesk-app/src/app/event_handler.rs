//! `ApplicationHandler` implementation for the winit event loop.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::bounds::article_bounds;
use super::core::NewsdeskApp;

impl ApplicationHandler for NewsdeskApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(manager) = &self.manager {
                        manager
                            .factory()
                            .set_bounds(article_bounds(size.width, size.height));
                    }
                    if let Some(article) = &self.article {
                        if let Err(e) = article.set_bounds(article_bounds(size.width, size.height)) {
                            tracing::warn!("Failed to resize article view: {e}");
                        }
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_and_schedule(event_loop);
    }

    fn memory_warning(&mut self, _event_loop: &ActiveEventLoop) {
        tracing::warn!("Low memory warning received");
        if let Some(manager) = &self.manager {
            manager.handle_memory_pressure();
        }
        self.sweep_cache();
    }
}
