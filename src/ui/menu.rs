//! Main menu

use std::ops::ControlFlow;

use crate::audio::SoundEffect;
use crate::scene::SceneName;
use crate::services::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Play,
    ToggleControls,
    Quit,
}

impl MenuButton {
    pub const ALL: [MenuButton; 3] = [MenuButton::Play, MenuButton::ToggleControls, MenuButton::Quit];
}

#[derive(Debug, Default)]
pub struct MainMenu {
    leaving: bool,
}

impl MainMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, services: &mut Services) {
        services.toggle_fade();
        services.audio.start_music();
    }

    /// Handle a button press; `Break` asks the host to quit
    pub fn press(&mut self, button: MenuButton, services: &mut Services) -> ControlFlow<()> {
        match button {
            MenuButton::Play => {
                if self.leaving {
                    return ControlFlow::Continue(());
                }
                self.leaving = true;
                services.audio.play(SoundEffect::ButtonClick);
                services.transition_to(SceneName::Game);
            }
            MenuButton::ToggleControls => {
                services.audio.play(SoundEffect::ButtonClick);
                services.settings.input_mode = services.settings.input_mode.toggled();
                log::info!("Input mode: {}", services.settings.input_mode.as_str());
            }
            MenuButton::Quit => {
                log::info!("Quit requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Button captions as currently shown
    pub fn labels(&self, services: &Services) -> Vec<(MenuButton, String)> {
        MenuButton::ALL
            .iter()
            .map(|&button| {
                let label = match button {
                    MenuButton::Play => "Play".to_string(),
                    MenuButton::ToggleControls => services.settings.input_mode.label(),
                    MenuButton::Quit => "Quit".to_string(),
                };
                (button, label)
            })
            .collect()
    }
}
