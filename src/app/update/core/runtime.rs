use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::super::view::trigger_strip_id;
use super::super::Effect;
use crate::cache::save_preference;
use folio_core::rotator::Rotator;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::{self, RelativeOffset};
use iced::window;
use std::time::Duration;
use tracing::{debug, info};

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SavePreference => {
                save_preference(&self.content_path, self.preference());
                Task::none()
            }
            Effect::StartTypewriters => {
                let jobs = self.page.typewriter_jobs();
                info!(
                    count = jobs.len(),
                    reduced_motion = self.config.reduced_motion,
                    "Starting typewriters"
                );
                let tasks: Vec<Task<Message>> = jobs
                    .into_iter()
                    .map(|job| {
                        let session = self.typewriter.start(&self.doc, job);
                        let target = session.target();
                        Task::perform(session.run(), move |outcome| {
                            Message::TypewriterFinished { target, outcome }
                        })
                    })
                    .collect();
                Task::batch(tasks)
            }
            Effect::StartRotator => {
                let Some(target) = self.page.platform_target() else {
                    return Task::none();
                };
                let Some(rotation) = self.page.content().greeting.platforms.clone() else {
                    return Task::none();
                };
                // Dropping the previous handle stops its rotator.
                self.rotator = None;
                let Some((handle, rotator)) = Rotator::start(&self.doc, target, &rotation) else {
                    return Task::none();
                };
                if self.config.reduced_motion {
                    return Task::none();
                }
                self.rotator_generation = self.rotator_generation.wrapping_add(1);
                let generation = self.rotator_generation;
                debug!(
                    generation,
                    interval_ms = rotator.interval().as_millis() as u64,
                    "Starting platform rotator"
                );
                self.rotator = Some(handle);
                Task::perform(rotator.run(), move |_| Message::RotatorStopped(generation))
            }
            Effect::StopRotator => {
                if let Some(handle) = self.rotator.take() {
                    handle.stop();
                }
                Task::none()
            }
            Effect::SettleLater(ticket) => {
                let delay = if self.config.reduced_motion {
                    Duration::ZERO
                } else {
                    self.config.expand_animation()
                };
                Task::perform(
                    async move {
                        tokio::time::sleep(delay).await;
                        ticket
                    },
                    Message::AnimationSettled,
                )
            }
            Effect::RevealTrigger(slide) => {
                let count = self.page.pager().map_or(0, |pager| pager.len());
                let x = if count > 1 {
                    slide as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                scrollable::snap_to(trigger_strip_id(), RelativeOffset { x, y: 0.0 })
            }
            Effect::QuitSafely => {
                save_preference(&self.content_path, self.preference());
                self.typewriter.registry().cancel_all();
                if let Some(handle) = self.rotator.take() {
                    handle.stop();
                }
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        Event::Window(window::Event::CloseRequested) => Some(Message::SafeQuit),
        _ => None,
    }
}
