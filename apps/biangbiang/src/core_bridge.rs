use bb_app::{AppModel, Effect, camera, text_mode};

use crate::command_executor::Command;

pub fn command_from_effect(effect: Effect) -> Option<Command> {
    match effect {
        Effect::ModeChanged(mode) => Some(Command::ModeChanged(mode)),

        Effect::Camera(cam) => match cam {
            camera::Effect::RecognizeCapturedImage { request_id } => {
                Some(Command::RecognizeCapturedImage { request_id })
            }
            camera::Effect::CopyToClipboard { text } => Some(Command::CopyToClipboard(text)),
            camera::Effect::ShowCopiedToast => Some(Command::ShowCopiedToast),
            camera::Effect::HideCopiedToast => Some(Command::HideCopiedToast),
            camera::Effect::PinyinToggled { show_pinyin } => {
                Some(Command::PinyinToggled(show_pinyin))
            }
        },

        Effect::Text(text) => match text {
            text_mode::Effect::ProcessText { request_id, text } => {
                Some(Command::ProcessText { request_id, text })
            }
            text_mode::Effect::ClearOutputs => Some(Command::ClearOutputs),
            text_mode::Effect::CopyToClipboard { text } => Some(Command::CopyToClipboard(text)),
        },
    }
}

pub fn commands_from_effects(effects: impl IntoIterator<Item = Effect>) -> Vec<Command> {
    effects
        .into_iter()
        .filter_map(command_from_effect)
        .collect()
}

pub fn dispatch(core: &mut AppModel, action: bb_app::Action) -> Vec<Command> {
    commands_from_effects(core.reduce(action))
}
