//! Dual-hand gesture interpreter
//!
//! Combines both hands' classifications for each frame into mode and zoom
//! events. Frames are processed one at a time by [`Interpreter::run`].

mod machine;

pub use machine::{
    Command, Interpreter, InterpreterConfig, InterpreterState, ModeRepeat, ModeRepeatError,
};
