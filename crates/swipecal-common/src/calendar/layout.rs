use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::calendar::event::CalendarEvent;

pub const MIN_EVENT_HEIGHT: f64 = 18.0;
const LANE_GAP: f64 = 3.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Where one day column sits on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnGeometry {
    pub x: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventHitbox {
    /// Index into the event store.
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub has_neighbor_above: bool,
}
impl EventHitbox {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

struct TempLayout {
    index: usize,
    start_secs: f64,
    end_secs: f64,
    lane: usize,
}

/// Lays the events of `day` out inside `column`. Overlapping events are put
/// side by side in lanes that split the column width.
pub fn lay_out_day(
    events: &[(usize, &CalendarEvent)],
    day: NaiveDate,
    column: &ColumnGeometry,
) -> Vec<EventHitbox> {
    let day_start: NaiveDateTime = day.and_time(chrono::NaiveTime::MIN);
    let day_end = day_start + Duration::days(1);

    let mut spans: Vec<TempLayout> = events
        .iter()
        .filter_map(|&(index, event)| {
            if event.end <= day_start || event.start >= day_end {
                // Zero length events still get a sliver.
                if !(event.start == event.end && event.start >= day_start && event.start < day_end) {
                    return None;
                }
            }
            let visible_start = event.start.max(day_start);
            let visible_end = event.end.min(day_end);
            Some(TempLayout {
                index,
                start_secs: (visible_start - day_start).num_seconds() as f64,
                end_secs: (visible_end - day_start).num_seconds() as f64,
                lane: 0,
            })
        })
        .collect();

    spans.sort_by(|a, b| a.start_secs.total_cmp(&b.start_secs));

    let mut hitboxes = Vec::with_capacity(spans.len());
    let mut cluster: Vec<TempLayout> = Vec::new();
    let mut cluster_end: f64 = 0.0;

    for item in spans {
        if cluster.is_empty() || item.start_secs < cluster_end {
            cluster_end = f64::max(cluster_end, item.end_secs);
            cluster.push(item);
        } else {
            flush_cluster(&mut cluster, &mut hitboxes, column);
            cluster.clear();

            cluster_end = item.end_secs;
            cluster.push(item);
        }
    }
    flush_cluster(&mut cluster, &mut hitboxes, column);

    hitboxes
}

fn flush_cluster(cluster: &mut [TempLayout], results: &mut Vec<EventHitbox>, column: &ColumnGeometry) {
    if cluster.is_empty() {
        return;
    }

    let mut max_lane: usize = 0;
    for i in 0..cluster.len() {
        let mut lane: usize = 0;
        while cluster[..i].iter().any(|prev| {
            prev.lane == lane
                && cluster[i].start_secs < prev.end_secs
                && cluster[i].end_secs > prev.start_secs
        }) {
            lane += 1;
        }
        cluster[i].lane = lane;
        max_lane = max_lane.max(lane);
    }

    let lanes_total = (max_lane + 1) as f64;
    let lane_width = column.width / lanes_total;

    for item in cluster.iter() {
        let y_start = item.start_secs * column.height / SECONDS_PER_DAY + column.top;
        let y_end = item.end_secs * column.height / SECONDS_PER_DAY + column.top;
        let x = column.x + item.lane as f64 * lane_width;
        let h = (y_end - y_start).max(MIN_EVENT_HEIGHT);

        let has_neighbor_above = results.iter().any(|prev: &EventHitbox| {
            let is_same_lane = (prev.x - x).abs() < 1.0;
            let touches_top = (prev.y + prev.h - y_start).abs() < 1.5;
            is_same_lane && touches_top
        });

        results.push(EventHitbox {
            index: item.index,
            x,
            y: y_start,
            w: (lane_width - LANE_GAP).max(1.0),
            h,
            has_neighbor_above,
        });
    }
}

/// The topmost hitbox under the pointer. Later boxes are drawn on top.
pub fn hit_test(hitboxes: &[EventHitbox], x: f64, y: f64) -> Option<&EventHitbox> {
    hitboxes.iter().rev().find(|hb| hb.contains(x, y))
}
