use crate::entities::Coordinates;

pub const DEFAULT_MAX_SAMPLES: usize = 5;

/// Picks evenly spaced probe points along `route`.
///
/// Takes every `max(1, len / max_samples)`-th point from the start, at most
/// `max_samples` of them, then appends the final point when it was not
/// already the last one taken. The result never exceeds `max_samples + 1`
/// points and always ends at the destination.
pub fn sample_route(route: &[Coordinates], max_samples: usize) -> Vec<Coordinates> {
    let max_samples = max_samples.max(1);
    let interval = (route.len() / max_samples).max(1);

    let mut last_index = None;
    let mut samples = Vec::with_capacity(max_samples + 1);

    for (index, point) in route.iter().enumerate().step_by(interval).take(max_samples) {
        samples.push(*point);
        last_index = Some(index);
    }

    let final_index = route.len().checked_sub(1);
    if let (Some(final_index), Some(last_index)) = (final_index, last_index) {
        if last_index != final_index {
            samples.push(route[final_index]);
        }
    }

    samples
}
