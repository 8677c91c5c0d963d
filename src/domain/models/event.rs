use tui_textarea::Input;

use super::Answer;

pub enum Event {
    AnswerFailed(String),
    AnswerReceived(Answer),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    ServiceUnavailable(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
