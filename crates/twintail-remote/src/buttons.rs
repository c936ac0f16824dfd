//! Button mapping tables
//!
//! The decoder reports which button was pressed. What it does depends on the
//! control profile, expressed as a [`ButtonMap`].

use log::debug;
use twintail_bluefruit::Button;
use twintail_composer::{
    AnimationMode, Brightness, Rgb, SharedControls,
    color::{BLUE, GREEN, RED, TEAL},
    controls::BRIGHTNESS_STEP,
};

/// Effect of a button press on the shared controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Ignore,
    /// Signed brightness step in percent
    StepBrightness(i8),
    SetBrightness(Brightness),
    StepSpeed(i8),
    SetColor(Rgb),
    SetMode(AnimationMode),
}

impl ButtonAction {
    pub fn apply(self, controls: &SharedControls) {
        match self {
            Self::Ignore => {}
            Self::StepBrightness(delta) => {
                let brightness = controls.step_brightness(delta);
                debug!("controls: brightness {}%", brightness.percent());
            }
            Self::SetBrightness(brightness) => {
                controls.set_brightness(brightness);
                debug!("controls: brightness {}%", brightness.percent());
            }
            Self::StepSpeed(delta) => {
                let speed = controls.step_speed(delta);
                debug!("controls: speed {}", speed.get());
            }
            Self::SetColor(color) => {
                controls.set_color(color);
                debug!("controls: color {:?}", color);
            }
            Self::SetMode(mode) => {
                controls.set_mode(mode);
                debug!("controls: mode {}", mode.as_str());
            }
        }
    }
}

/// Actions for every control pad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMap {
    pub up: ButtonAction,
    pub down: ButtonAction,
    pub left: ButtonAction,
    pub right: ButtonAction,
    /// Buttons 1 to 4
    pub numbered: [ButtonAction; 4],
}

impl ButtonMap {
    /// Up/Down brightness, everything else ignored
    pub const fn base() -> Self {
        Self {
            up: ButtonAction::StepBrightness(BRIGHTNESS_STEP),
            down: ButtonAction::StepBrightness(-BRIGHTNESS_STEP),
            left: ButtonAction::Ignore,
            right: ButtonAction::Ignore,
            numbered: [ButtonAction::Ignore; 4],
        }
    }

    pub const fn action(&self, button: Button) -> ButtonAction {
        match button {
            Button::One => self.numbered[0],
            Button::Two => self.numbered[1],
            Button::Three => self.numbered[2],
            Button::Four => self.numbered[3],
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
        }
    }
}

/// 1-4 pick a color
pub const PALETTE: ButtonMap = ButtonMap {
    numbered: [
        ButtonAction::SetColor(RED),
        ButtonAction::SetColor(GREEN),
        ButtonAction::SetColor(BLUE),
        ButtonAction::SetColor(TEAL),
    ],
    ..ButtonMap::base()
};

/// 1-4 pick a mode, Left/Right change speed
pub const ANIMATIONS: ButtonMap = ButtonMap {
    left: ButtonAction::StepSpeed(-1),
    right: ButtonAction::StepSpeed(1),
    numbered: [
        ButtonAction::SetMode(AnimationMode::Solid),
        ButtonAction::SetMode(AnimationMode::Revolve),
        ButtonAction::SetMode(AnimationMode::Wipe),
        ButtonAction::SetMode(AnimationMode::Rainbow),
    ],
    ..ButtonMap::base()
};

/// 1-4 pick a brightness preset
pub const DIMMER: ButtonMap = ButtonMap {
    numbered: [
        ButtonAction::SetBrightness(Brightness::from_percent(25)),
        ButtonAction::SetBrightness(Brightness::from_percent(50)),
        ButtonAction::SetBrightness(Brightness::from_percent(75)),
        ButtonAction::SetBrightness(Brightness::FULL),
    ],
    ..ButtonMap::base()
};
