// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Cost estimates for transmission pipes and heat exchangers.
//!
//! Flow series are hourly heat flows in MW.  All functions are pure, and the
//! design capacity of a piece of equipment is always the peak of the flow
//! series after smoothing it with a moving average.

/// Returned by [`cost_of_connection`] when the flow series carries no heat,
/// and no pipe needs to be built.
pub const NO_CONNECTION_COST: f64 = -1.0;

/// Default moving average window, in hours.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 24;

/// Upper capacity bound of each pipe size, in MW.  The last bracket catches
/// every capacity.
pub const PIPE_CAPACITIES: [f64; 14] = [
    0.2, 0.3, 0.6, 1.2, 1.9, 3.6, 6.1, 9.8, 20.0, 45.0, 75.0, 125.0, 190.0, 1e19,
];

/// Cost of each pipe size in €/m, aligned with [`PIPE_CAPACITIES`].
pub const PIPE_COSTS: [f64; 14] = [
    195.0, 206.0, 220.0, 240.0, 261.0, 288.0, 323.0, 357.0, 426.0, 564.0, 701.0, 839.0, 976.0,
    976.0,
];

/// Cost of an air to liquid heat exchanger at a source, in €/MW.
pub const SOURCE_EXCHANGER_COST: f64 = 15_000.0;

/// Sink exchangers below this capacity (MW) use the small-plant costs.
pub const SINK_EXCHANGER_THRESHOLD: f64 = 1.0;

/// Cost of a liquid to liquid heat exchanger below 1 MW, in €/MW.
pub const SMALL_SINK_EXCHANGER_COST: f64 = 265_000.0 + 240_000.0;

/// Cost of a liquid to liquid heat exchanger from 1 MW on, in €/MW.
pub const LARGE_SINK_EXCHANGER_COST: f64 = 100_000.0 + 90_000.0;

/// Returns the moving average of `series` over `window` values.
///
/// This is the full convolution of the series with a box kernel of length
/// `window`, divided by `window`, so the result has `len + window - 1`
/// values and ramps up and down at both ends.  A window of `0` is treated as
/// `1`.
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    if series.is_empty() {
        return vec![];
    }

    let len = series.len() + window - 1;
    let mut averages = Vec::with_capacity(len);
    let mut sum = 0.0;
    for k in 0..len {
        if k < series.len() {
            sum += series[k];
        }
        if k >= window {
            sum -= series[k - window];
        }
        averages.push(sum / window as f64);
    }
    averages
}

/// Returns the peak of the smoothed flow series, or `0.0` for an empty
/// series.
pub fn design_capacity(flow_series: &[f64], window: usize) -> f64 {
    moving_average(flow_series, window)
        .into_iter()
        .fold(None, |peak: Option<f64>, value| {
            Some(peak.map_or(value, |p| p.max(value)))
        })
        .unwrap_or(0.0)
}

/// Estimates the cost of a transmission pipe of `distance_km` carrying
/// `flow_series`, in €.
///
/// The pipe is the smallest one in [`PIPE_CAPACITIES`] that can carry the
/// design capacity.  Returns [`NO_CONNECTION_COST`] if the series sums to
/// zero.
pub fn cost_of_connection(distance_km: f64, flow_series: &[f64], window: usize) -> f64 {
    if flow_series.iter().sum::<f64>() == 0.0 {
        return NO_CONNECTION_COST;
    }

    let capacity = design_capacity(flow_series, window);
    let pipe = PIPE_CAPACITIES
        .iter()
        .position(|c| *c >= capacity)
        .unwrap_or(0);

    PIPE_COSTS[pipe] * distance_km * 1000.0
}

/// Estimates the cost of the heat exchanger at a source, in €.
pub fn cost_of_heat_exchanger_source(flow_series: &[f64], window: usize) -> f64 {
    design_capacity(flow_series, window) * SOURCE_EXCHANGER_COST
}

/// Estimates the cost of the heat exchanger at a sink, in €.
pub fn cost_of_heat_exchanger_sink(flow_series: &[f64], window: usize) -> f64 {
    let capacity = design_capacity(flow_series, window);

    if capacity < SINK_EXCHANGER_THRESHOLD {
        capacity * SMALL_SINK_EXCHANGER_COST
    } else {
        capacity * LARGE_SINK_EXCHANGER_COST
    }
}

/// Spreads an investment of `cost` over `years` periods at `rate`, using
/// the capital recovery factor `r(1+r)^n / ((1+r)^n - 1)`.
///
/// With a rate of zero the cost is split evenly, and with zero years the
/// cost is returned unchanged.
pub fn cost_after_discount(cost: f64, rate: f64, years: u32) -> f64 {
    if years == 0 {
        return cost;
    }
    if rate == 0.0 {
        return cost / years as f64;
    }

    let growth = (1.0 + rate).powi(years as i32);
    cost * rate * growth / (growth - 1.0)
}
