//! StateMachine — keyed registry + одно активное состояние

use std::collections::HashMap;
use thiserror::Error;
use super::state::{DebugShapes, State, StateKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("state `{0}` is not registered")]
    UnknownState(&'static str),

    #[error("state `{0}` is already registered")]
    DuplicateState(&'static str),

    #[error("initial state already set (current `{0}`)")]
    AlreadyInitialized(&'static str),
}

/// Generic FSM
///
/// Инвариант: `current`, если задан, всегда зарегистрирован
/// (состояния не удаляются, активация только через проверенный ключ).
#[derive(Debug, Clone)]
pub struct StateMachine<K: StateKey, S> {
    states: HashMap<K, S>,
    current: Option<K>,
}

impl<K: StateKey, S> Default for StateMachine<K, S> {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            current: None,
        }
    }
}

impl<K: StateKey, S> StateMachine<K, S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Регистрация состояния (дубликат отклоняется, первая регистрация остаётся)
    pub fn add_state(&mut self, key: K, state: S) -> Result<(), FsmError> {
        if self.states.contains_key(&key) {
            let err = FsmError::DuplicateState(key.name());
            crate::log_warning(&format!("[FSM] {}", err));
            return Err(err);
        }

        self.states.insert(key, state);
        Ok(())
    }

    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Имя активного состояния ("None" до активации)
    pub fn current_state_name(&self) -> &'static str {
        self.current.map(|key| key.name()).unwrap_or("None")
    }

    pub fn state(&self, key: K) -> Option<&S> {
        self.states.get(&key)
    }

    pub fn state_mut(&mut self, key: K) -> Option<&mut S> {
        self.states.get_mut(&key)
    }

    pub fn contains(&self, key: K) -> bool {
        self.states.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn require(&self, key: K) -> Result<(), FsmError> {
        if self.states.contains_key(&key) {
            Ok(())
        } else {
            let err = FsmError::UnknownState(key.name());
            crate::log_error(&format!("[FSM] {}", err));
            Err(err)
        }
    }

    /// Первичная активация: только on_enter, без on_exit
    pub fn set_initial_state<C>(&mut self, key: K, ctx: &mut C) -> Result<(), FsmError>
    where
        S: State<C>,
    {
        if let Some(current) = self.current {
            let err = FsmError::AlreadyInitialized(current.name());
            crate::log_warning(&format!("[FSM] {}", err));
            return Err(err);
        }

        self.require(key)?;

        if let Some(state) = self.states.get_mut(&key) {
            state.on_enter(ctx);
        }
        self.current = Some(key);
        crate::log(&format!("[FSM] → {}", key.name()));
        Ok(())
    }

    /// Переход: on_exit(current) → on_enter(new) → swap
    ///
    /// Неизвестный ключ: ошибка, текущее состояние не трогаем.
    /// Переход в тот же ключ — полный exit + enter.
    pub fn change_state<C>(&mut self, key: K, ctx: &mut C) -> Result<(), FsmError>
    where
        S: State<C>,
    {
        self.require(key)?;

        let previous = self.current;
        if let Some(state) = previous.and_then(|prev| self.states.get_mut(&prev)) {
            state.on_exit(ctx);
        }
        if let Some(state) = self.states.get_mut(&key) {
            state.on_enter(ctx);
        }
        self.current = Some(key);

        crate::log(&format!(
            "[FSM] {} → {}",
            previous.map(|prev| prev.name()).unwrap_or("None"),
            key.name()
        ));
        Ok(())
    }

    fn active_mut(&mut self) -> Option<&mut S> {
        let key = self.current?;
        self.states.get_mut(&key)
    }

    pub fn update<C>(&mut self, ctx: &mut C)
    where
        S: State<C>,
    {
        if let Some(state) = self.active_mut() {
            state.on_update(ctx);
        }
    }

    pub fn fixed_update<C>(&mut self, ctx: &mut C)
    where
        S: State<C>,
    {
        if let Some(state) = self.active_mut() {
            state.on_fixed_update(ctx);
        }
    }

    pub fn draw_debug<C>(&self, ctx: &C, shapes: &mut DebugShapes)
    where
        S: State<C>,
    {
        if let Some(state) = self.current.and_then(|key| self.states.get(&key)) {
            state.draw_debug(ctx, shapes);
        }
    }
}
