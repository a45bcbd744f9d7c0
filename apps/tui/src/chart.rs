//! Projection of a district aggregate onto the household bar chart.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::domain::{Count, DistrictAggregate, Gender, HouseholdKind};

/// Default number of ticks the value axis aims for.
pub const DEFAULT_MAX_TICKS: u16 = 11;

static NEXT_CHART_ID: AtomicU64 = AtomicU64::new(1);

/// `[ordinary, single]` per gender, for one district.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub male: [Count; 2],
    pub female: [Count; 2],
}

pub const fn series_for(district: &DistrictAggregate) -> ChartSeries {
    ChartSeries {
        male: district.male.as_array(),
        female: district.female.as_array(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub gender: Gender,
    pub data: [Count; 2],
}

impl Dataset {
    pub const fn label(&self) -> &'static str {
        self.gender.label()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// A live grouped bar chart: household kinds on the x axis, one dataset per gender.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdChart {
    id: u64,
    datasets: [Dataset; 2],
    begin_at_zero: bool,
    revision: u64,
}

impl HouseholdChart {
    /// Builds a new chart instance from the initial series.
    pub fn render(initial: ChartSeries) -> Self {
        Self {
            id: NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed),
            datasets: [
                Dataset {
                    gender: Gender::Male,
                    data: initial.male,
                },
                Dataset {
                    gender: Gender::Female,
                    data: initial.female,
                },
            ],
            begin_at_zero: false,
            revision: 0,
        }
    }

    /// Replaces both datasets in place and schedules a redraw.
    pub fn update(&mut self, male: [Count; 2], female: [Count; 2]) {
        self.datasets[0].data = male;
        self.datasets[1].data = female;
        self.revision += 1;
    }

    pub const fn id(&self) -> u64 {
        self.id
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub const fn datasets(&self) -> &[Dataset; 2] {
        &self.datasets
    }

    pub fn categories(&self) -> [&'static str; 2] {
        HouseholdKind::ALL.map(HouseholdKind::label)
    }

    pub fn series(&self) -> ChartSeries {
        ChartSeries {
            male: self.datasets[0].data,
            female: self.datasets[1].data,
        }
    }

    /// Value-axis bounds over the valid data points, `None` if there are none.
    pub fn value_axis(&self, max_ticks: u16) -> Option<AxisRange> {
        let values = self
            .datasets
            .iter()
            .flat_map(|dataset| dataset.data)
            .filter_map(Count::value);
        nice_axis(values, self.begin_at_zero, max_ticks)
    }
}

/// Linear "nice number" scale: the axis snaps outward to multiples of a
/// 1/2/5×10ⁿ step so that at most `max_ticks` ticks are needed.
pub fn nice_axis(
    values: impl IntoIterator<Item = u64>,
    begin_at_zero: bool,
    max_ticks: u16,
) -> Option<AxisRange> {
    let mut iter = values.into_iter();
    let first = iter.next()?;
    let (low, high) = iter.fold((first, first), |(low, high), value| {
        (low.min(value), high.max(value))
    });

    #[allow(clippy::cast_precision_loss)]
    let (mut min, mut max) = (low as f64, high as f64);
    if begin_at_zero {
        min = min.min(0.0);
    }
    if (max - min).abs() < f64::EPSILON {
        let offset = if max.abs() < f64::EPSILON {
            1.0
        } else {
            (max * 0.05).abs()
        };
        max += offset;
        if !begin_at_zero {
            min -= offset;
        }
    }

    let spaces = f64::from(max_ticks.max(2) - 1);
    let step = nice_num((max - min) / spaces);

    Some(AxisRange {
        min: (min / step).floor() * step,
        max: (max / step).ceil() * step,
        step,
    })
}

fn nice_num(range: f64) -> f64 {
    let rounded = range.round();
    let range = if (range - rounded).abs() <= range / 1000.0 {
        rounded
    } else {
        range
    };
    let magnitude = 10_f64.powf(range.log10().floor());
    let fraction = range / magnitude;
    let nice_fraction = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice_fraction * magnitude
}
