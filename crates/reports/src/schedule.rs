use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::reports::{ReportContext, ReportKind};

/// A fixed wall-clock time of day in a named time zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailySchedule {
    time: NaiveTime,
    tz: Tz,
}

impl DailySchedule {
    pub fn new(time: NaiveTime, tz: Tz) -> Self {
        Self { time, tz }
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// The local calendar date of `instant` in this schedule's time zone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// First fire instant strictly after `now`.
    ///
    /// A time that falls in a DST gap fires one hour later; an ambiguous time fires at its
    /// earlier occurrence.
    pub fn next_fire_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.local_date(now)
            .iter_days()
            .filter_map(|date| self.fire_on(date))
            .find(|fire| *fire > now)
            .unwrap_or_else(|| now + Duration::days(1))
    }

    fn fire_on(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        let local = date.and_time(self.time);
        self.tz
            .from_local_datetime(&local)
            .earliest()
            .or_else(|| {
                self.tz
                    .from_local_datetime(&(local + Duration::hours(1)))
                    .earliest()
            })
            .map(|fire| fire.with_timezone(&Utc))
    }

    /// Sleeps until the first fire instant after `after` and returns it.
    pub async fn wait_after(&self, after: DateTime<Utc>) -> DateTime<Utc> {
        let fire = self.next_fire_after(after);
        let delay = (fire - Utc::now()).to_std().unwrap_or_default();
        tokio::time::sleep(delay).await;
        fire
    }

    pub async fn wait_next(&self) -> DateTime<Utc> {
        self.wait_after(Utc::now()).await
    }
}

/// Runs `task` once per day at the scheduled time, forever.
///
/// The task receives the local date of the fire. A fire missed while a previous run was still
/// going (or while the process was suspended) is skipped, never replayed.
pub async fn run_daily<F, Fut>(name: String, schedule: DailySchedule, mut task: F)
where
    F: FnMut(NaiveDate) -> Fut,
    Fut: Future<Output = ()>,
{
    info!(
        "Scheduled '{}' daily at {} (next: {})",
        name,
        schedule.time(),
        schedule.next_fire_after(Utc::now())
    );

    let mut last = Utc::now();
    loop {
        let fire = schedule.wait_after(last).await;
        info!("Running scheduled '{}'", name);
        task(schedule.local_date(fire)).await;
        last = fire.max(Utc::now());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduledReport {
    pub kind: ReportKind,
    pub schedule: DailySchedule,
    /// Report on the day before the fire date, for jobs that run just after midnight.
    pub previous_day: bool,
}

impl ScheduledReport {
    pub fn new(kind: ReportKind, schedule: DailySchedule) -> Self {
        Self {
            kind,
            schedule,
            previous_day: false,
        }
    }

    pub fn for_previous_day(kind: ReportKind, schedule: DailySchedule) -> Self {
        Self {
            previous_day: true,
            ..Self::new(kind, schedule)
        }
    }

    /// The date this job reports on when it fires on local date `fired_on`.
    pub fn report_date(&self, fired_on: NaiveDate) -> NaiveDate {
        match self.previous_day {
            true => fired_on.pred_opt().unwrap_or(fired_on),
            false => fired_on,
        }
    }
}

/// Spawns one independent task per scheduled report.
pub fn spawn_reports(context: Arc<ReportContext>, jobs: Vec<ScheduledReport>) -> Vec<JoinHandle<()>> {
    jobs.into_iter()
        .map(|job| {
            let context = context.clone();
            tokio::spawn(run_daily(job.kind.to_string(), job.schedule, move |fired_on| {
                let context = context.clone();
                let date = job.report_date(fired_on);
                async move {
                    match context.run(job.kind, date).await {
                        Ok(outcome) => info!("{} report for {}: {}", job.kind, date, outcome),
                        Err(e) => error!("{} report for {} failed: {}", job.kind, date, e),
                    }
                }
            }))
        })
        .collect()
}
