//! Generic finite state machine
//!
//! Ничего не знает про ECS и конкретные поведения: ключ (`StateKey`),
//! состояние (`State<C>`) и контекст вызова `C` задаёт пользователь.

pub mod machine;
pub mod state;


pub use machine::{FsmError, StateMachine};
pub use state::{DebugColor, DebugShape, DebugShapes, State, StateKey};
