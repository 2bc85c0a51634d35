//! Async effect driver.
//!
//! Owns a [`Scheduler`] and its host display inside one tokio task. Every
//! buffer mutation (ticks, spawns, cancellations, host visits) goes through
//! that task's command queue, so effects started from any task or thread are
//! applied one at a time.

use std::time::Duration;

use anyhow::{anyhow, Result};
use log::debug;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::core::{EffectHandle, EffectId, Finished, Scheduler, TimedMutator};

/// Pending commands before `send` starts waiting.
pub const COMMAND_QUEUE_DEPTH: usize = 64;

type Visit<H> = Box<dyn FnOnce(&mut H) + Send>;

enum DriverCommand<H> {
    Spawn {
        mutator: TimedMutator<H>,
        reply: oneshot::Sender<EffectHandle>,
    },
    Cancel {
        id: EffectId,
        reply: oneshot::Sender<Option<Finished>>,
    },
    Visit(Visit<H>),
    Shutdown {
        reply: oneshot::Sender<H>,
    },
}

/// Handle to a running driver task.
pub struct Driver<H> {
    cmd_tx: mpsc::Sender<DriverCommand<H>>,
    finished_rx: mpsc::UnboundedReceiver<Finished>,
    task: JoinHandle<()>,
}

impl<H: Send + 'static> Driver<H> {
    /// Start the driver task on the current tokio runtime.
    ///
    /// `resolution` is how often the task wakes to advance the scheduler.
    pub fn spawn(host: H, resolution: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (finished_tx, finished_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(host, resolution, cmd_rx, finished_tx));
        Self {
            cmd_tx,
            finished_rx,
            task,
        }
    }

    /// Start `mutator` against the host.
    pub async fn start(&self, mutator: TimedMutator<H>) -> Result<EffectHandle> {
        let (reply, rx) = oneshot::channel();
        self.send(DriverCommand::Spawn { mutator, reply }).await?;
        rx.await.map_err(|_| stopped())
    }

    /// Cancel one effect now. `None` if it already stopped.
    pub async fn cancel(&self, id: EffectId) -> Result<Option<Finished>> {
        let (reply, rx) = oneshot::channel();
        self.send(DriverCommand::Cancel { id, reply }).await?;
        rx.await.map_err(|_| stopped())
    }

    /// Run `f` against the host between engine steps.
    pub async fn with_host<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut H) -> R + Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        let visit: Visit<H> = Box::new(move |host| {
            let _ = reply.send(f(host));
        });
        self.send(DriverCommand::Visit(visit)).await?;
        rx.await.map_err(|_| stopped())
    }

    /// Read-only form of [`Driver::with_host`].
    pub async fn inspect<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&H) -> R + Send + 'static,
    {
        self.with_host(move |host| f(host)).await
    }

    /// Wait for the next effect to stop (any reason).
    pub async fn next_finished(&mut self) -> Option<Finished> {
        self.finished_rx.recv().await
    }

    pub fn try_finished(&mut self) -> Option<Finished> {
        self.finished_rx.try_recv().ok()
    }

    /// Cancel everything still running and hand the host back.
    pub async fn shutdown(self) -> Result<H> {
        let (reply, rx) = oneshot::channel();
        self.send(DriverCommand::Shutdown { reply }).await?;
        let host = rx.await.map_err(|_| stopped())?;
        let _ = self.task.await;
        Ok(host)
    }

    async fn send(&self, cmd: DriverCommand<H>) -> Result<()> {
        self.cmd_tx.send(cmd).await.map_err(|_| stopped())
    }
}

fn stopped() -> anyhow::Error {
    anyhow!("effect driver stopped")
}

struct Clock {
    last: Instant,
}

impl Clock {
    /// Whole milliseconds since the last call; the remainder carries over.
    fn elapsed_ms(&mut self) -> u64 {
        let ms = self.last.elapsed().as_millis() as u64;
        self.last += Duration::from_millis(ms);
        ms
    }
}

async fn run<H>(
    mut host: H,
    resolution: Duration,
    mut cmd_rx: mpsc::Receiver<DriverCommand<H>>,
    finished_tx: mpsc::UnboundedSender<Finished>,
) {
    let mut scheduler = Scheduler::new();
    let mut interval = time::interval(resolution.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut clock = Clock {
        last: Instant::now(),
    };

    loop {
        tokio::select! {
            _ = interval.tick() => {
                catch_up(&mut scheduler, &mut host, &mut clock, &finished_tx);
            }
            cmd = cmd_rx.recv() => {
                // Commands land at the current time, after any due ticks.
                catch_up(&mut scheduler, &mut host, &mut clock, &finished_tx);
                match cmd {
                    Some(DriverCommand::Spawn { mutator, reply }) => {
                        let handle = scheduler.spawn(&mut host, mutator);
                        debug!("driver spawned effect {}", handle.id());
                        let _ = reply.send(handle);
                    }
                    Some(DriverCommand::Cancel { id, reply }) => {
                        let finished = scheduler.cancel(id, &mut host);
                        if let Some(f) = &finished {
                            let _ = finished_tx.send(f.clone());
                        }
                        let _ = reply.send(finished);
                    }
                    Some(DriverCommand::Visit(visit)) => visit(&mut host),
                    Some(DriverCommand::Shutdown { reply }) => {
                        for f in scheduler.cancel_all(&mut host) {
                            let _ = finished_tx.send(f);
                        }
                        let _ = reply.send(host);
                        return;
                    }
                    None => {
                        scheduler.cancel_all(&mut host);
                        return;
                    }
                }
            }
        }
    }
}

fn catch_up<H>(
    scheduler: &mut Scheduler<H>,
    host: &mut H,
    clock: &mut Clock,
    finished_tx: &mpsc::UnboundedSender<Finished>,
) {
    let elapsed = clock.elapsed_ms();
    if elapsed == 0 {
        return;
    }
    let report = scheduler.advance(elapsed, host);
    for f in report.finished {
        let _ = finished_tx.send(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{whole, Glitch, SimpleRng, Surface, TextBuffer, Typing};
    use crate::types::StopReason;

    #[tokio::test(start_paused = true)]
    async fn typing_runs_to_completion() {
        let mut driver = Driver::spawn(TextBuffer::new(), Duration::from_millis(10));
        let handle = driver
            .start(TimedMutator::new(Typing::new("abc"), whole))
            .await
            .unwrap();

        let finished = driver.next_finished().await.unwrap();
        assert_eq!(finished.id, handle.id());
        assert_eq!(finished.reason, StopReason::Completed);

        let content = driver.inspect(|b: &TextBuffer| b.content().to_string()).await.unwrap();
        assert_eq!(content, "abc");
        let buf = driver.shutdown().await.unwrap();
        assert_eq!(buf.content(), "abc");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_through_the_queue_restores_glitch() {
        let mut driver = Driver::spawn(
            TextBuffer::with_content("hello world"),
            Duration::from_millis(10),
        );
        let glitch = Glitch::new(SimpleRng::new(7)).with_duration_ms(60_000);
        let handle = driver.start(TimedMutator::new(glitch, whole)).await.unwrap();

        time::sleep(Duration::from_millis(500)).await;
        let finished = driver.cancel(handle.id()).await.unwrap().unwrap();
        assert_eq!(finished.reason, StopReason::Cancelled);
        assert_eq!(driver.next_finished().await.unwrap().id, handle.id());

        let content = driver.inspect(|b: &TextBuffer| b.content().to_string()).await.unwrap();
        assert_eq!(content, "hello world");
        assert!(driver.cancel(handle.id()).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn handle_cancel_from_another_task_is_observed() {
        let mut driver = Driver::spawn(TextBuffer::new(), Duration::from_millis(10));
        let handle = driver
            .start(TimedMutator::new(Typing::new("a long line of text"), whole))
            .await
            .unwrap();

        let remote = handle.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(120)).await;
            remote.cancel();
        });

        let finished = driver.next_finished().await.unwrap();
        assert_eq!(finished.reason, StopReason::Cancelled);
        let len = driver.inspect(|b: &TextBuffer| b.content().len()).await.unwrap();
        assert!(len < "a long line of text".len());
    }

    #[tokio::test(start_paused = true)]
    async fn host_visits_are_serialized_with_ticks() {
        let driver = Driver::spawn(TextBuffer::new(), Duration::from_millis(10));
        driver
            .with_host(|b: &mut TextBuffer| b.append_line("first"))
            .await
            .unwrap();
        driver
            .with_host(|b: &mut TextBuffer| b.append_line("second"))
            .await
            .unwrap();
        let buf = driver.shutdown().await.unwrap();
        assert_eq!(buf.content(), "first\nsecond");
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_running_effects() {
        let driver = Driver::spawn(TextBuffer::new(), Duration::from_millis(10));
        let handle = driver
            .start(TimedMutator::new(Typing::new("never finishes"), whole))
            .await
            .unwrap();
        let buf = driver.shutdown().await.unwrap();
        assert!(buf.content().is_empty());
        assert!(handle.is_cancelled());
    }
}
