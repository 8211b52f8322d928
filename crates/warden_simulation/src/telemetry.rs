//! Telemetry sink — `(key, value)` строки для внешнего debug UI
//!
//! Sink инжектится как Resource (без глобального singleton).
//! `NoopTelemetry` — валидная реализация по умолчанию.

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub trait TelemetrySink: Send + Sync {
    fn publish(&self, key: &str, value: &str);
}

/// Ничего не делает
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn publish(&self, _key: &str, _value: &str) {}
}

/// Пишет в logger (DEBUG) — только когда значение key изменилось
///
/// Headless замена debug overlay: publish идёт каждый тик, в лог попадают переходы.
#[derive(Default)]
pub struct LogTelemetry {
    last: Mutex<HashMap<String, String>>,
}

impl LogTelemetry {
    /// Запомнить значение; true если оно отличается от предыдущего
    fn record(&self, key: &str, value: &str) -> bool {
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if last.get(key).map(String::as_str) == Some(value) {
            return false;
        }
        last.insert(key.to_string(), value.to_string());
        true
    }
}

impl TelemetrySink for LogTelemetry {
    fn publish(&self, key: &str, value: &str) {
        if self.record(key, value) {
            crate::logger::log(&format!("📊 {}: {}", key, value));
        }
    }
}

/// Хранит последнее значение по каждому key (tests, overlays)
#[derive(Default)]
pub struct MemoryTelemetry {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTelemetry {
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TelemetrySink for MemoryTelemetry {
    fn publish(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for Arc<T> {
    fn publish(&self, key: &str, value: &str) {
        (**self).publish(key, value);
    }
}

/// Resource: активный sink
#[derive(Resource)]
pub struct Telemetry {
    sink: Box<dyn TelemetrySink>,
}

impl Telemetry {
    pub fn new(sink: impl TelemetrySink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    pub fn publish(&self, key: &str, value: &str) {
        self.sink.publish(key, value);
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new(NoopTelemetry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_telemetry_keeps_latest_value() {
        let sink = Arc::new(MemoryTelemetry::default());
        let telemetry = Telemetry::new(sink.clone());

        telemetry.publish("Enemy State", "Patrol");
        telemetry.publish("Enemy State", "Chase");

        assert_eq!(sink.get("Enemy State").as_deref(), Some("Chase"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_noop_is_default() {
        // Не паникует, ничего не хранит
        Telemetry::default().publish("key", "value");
    }

    #[test]
    fn test_log_telemetry_reports_only_changes() {
        let sink = LogTelemetry::default();

        assert!(sink.record("Enemy State", "Patrol"));
        assert!(!sink.record("Enemy State", "Patrol"));
        assert!(sink.record("Enemy State", "Chase"));
        // Другой key независим
        assert!(sink.record("Enemy State 7v1", "Patrol"));

        // publish не паникует без инициализированного logger
        sink.publish("Enemy State", "Attack");
        assert!(!sink.record("Enemy State", "Attack"));
    }
}
