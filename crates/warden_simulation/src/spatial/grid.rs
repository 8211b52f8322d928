//! SpatialIndex — bucket grid (cell = IVec2(floor(x/size), floor(z/size)))

use bevy::prelude::*;
use std::collections::HashMap;

/// Минимальный размер клетки (защита от деления на 0)
pub const MIN_CELL_SIZE: f32 = 0.01;

/// Uniform grid index
///
/// Инварианты:
/// - cell_size фиксирован при создании, не меняется
/// - get_nearby возвращает НАДМНОЖЕСТВО точного результата (caller фильтрует по distance)
#[derive(Debug, Clone)]
pub struct SpatialIndex<T> {
    cell_size: f32,
    cells: HashMap<IVec2, Vec<T>>,
    /// Bounding box занятых клеток (min, max)
    bounds: Option<(IVec2, IVec2)>,
    len: usize,
}

impl<T> SpatialIndex<T> {
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size >= MIN_CELL_SIZE {
            cell_size
        } else {
            crate::logger::log_warning(&format!(
                "SpatialIndex: invalid cell_size {} → clamped to {}",
                cell_size, MIN_CELL_SIZE
            ));
            MIN_CELL_SIZE
        };

        Self {
            cell_size,
            cells: HashMap::new(),
            bounds: None,
            len: 0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Сбросить все клетки (вызывается в начале каждого тика)
    pub fn clear(&mut self) {
        self.cells.clear();
        self.bounds = None;
        self.len = 0;
    }

    /// Добавить item в клетку его позиции
    pub fn register(&mut self, position: Vec3, item: T) {
        let cell = self.cell_of(position);
        self.cells.entry(cell).or_default().push(item);
        self.bounds = Some(match self.bounds {
            Some((min, max)) => (min.min(cell), max.max(cell)),
            None => (cell, cell),
        });
        self.len += 1;
    }

    /// Координаты клетки для world position (плоскость XZ)
    pub fn cell_of(&self, position: Vec3) -> IVec2 {
        IVec2::new(
            (position.x / self.cell_size).floor() as i32,
            (position.z / self.cell_size).floor() as i32,
        )
    }

    /// Сколько клеток в каждую сторону сканировать для radius
    ///
    /// Бесконечный radius насыщается до `i32::MAX` (= весь grid).
    pub fn cell_radius(&self, radius: f32) -> i32 {
        if radius.is_nan() || radius <= 0.0 {
            return 0;
        }
        (radius / self.cell_size).ceil() as i32
    }

    /// Итератор по всем items в блоке (2r+1)² клеток вокруг position
    ///
    /// radius 0 → только центральная клетка. Отсутствующие клетки ничего не дают.
    /// Порядок обхода: по x, затем по z.
    pub fn nearby_iter(&self, position: Vec3, radius: f32) -> impl Iterator<Item = &T> + '_ {
        self.cells_in_range(position, radius)
            .into_iter()
            .filter_map(move |cell| self.cells.get(&cell))
            .flatten()
    }

    /// Клетки блока, обрезанного по bounding box занятых клеток
    ///
    /// Если блок больше числа занятых клеток — обходим занятые клетки
    /// (отсортированные), а не пустое пространство.
    fn cells_in_range(&self, position: Vec3, radius: f32) -> Vec<IVec2> {
        let Some((min, max)) = self.bounds else {
            return Vec::new();
        };
        let center = self.cell_of(position);
        let r = i64::from(self.cell_radius(radius));

        // i64: center ± i32::MAX не переполняется
        let lo_x = (i64::from(center.x) - r).max(i64::from(min.x));
        let hi_x = (i64::from(center.x) + r).min(i64::from(max.x));
        let lo_z = (i64::from(center.y) - r).max(i64::from(min.y));
        let hi_z = (i64::from(center.y) + r).min(i64::from(max.y));
        if lo_x > hi_x || lo_z > hi_z {
            return Vec::new();
        }

        let area = (hi_x - lo_x + 1) as u128 * (hi_z - lo_z + 1) as u128;
        if area > self.cells.len() as u128 {
            let mut occupied: Vec<IVec2> = self
                .cells
                .keys()
                .copied()
                .filter(|cell| {
                    (lo_x..=hi_x).contains(&i64::from(cell.x)) && (lo_z..=hi_z).contains(&i64::from(cell.y))
                })
                .collect();
            occupied.sort_by_key(|cell| (cell.x, cell.y));
            return occupied;
        }

        (lo_x..=hi_x)
            .flat_map(|x| (lo_z..=hi_z).map(move |z| IVec2::new(x as i32, z as i32)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Количество непустых клеток
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl<T: Clone> SpatialIndex<T> {
    /// Все items в окрестности (superset, без distance фильтра)
    pub fn get_nearby(&self, position: Vec3, radius: f32) -> Vec<T> {
        self.nearby_iter(position, radius).cloned().collect()
    }
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CELL_SIZE)
    }
}
