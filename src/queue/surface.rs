// SPDX-License-Identifier: MPL-2.0
//! Display surface: the actor that owns one message queue.
//!
//! Every mutation (arrival, expiry, tap, swipe, clear) is handled by a
//! single Tokio task, one at a time, so removals that race each other are
//! serialized and the second one finds nothing to remove. Readers get a
//! fresh snapshot through a `watch` channel after each mutation.

use super::gesture::{SwipeGesture, SwipePolicy};
use super::state::{Admission, AdmissionPolicy, QueueState, Retirement};
use crate::channel::{ChannelId, MessageBus, Payload, Subscription, SubscriptionHandle};
use crate::config::{Alignment, Anchor, SurfaceConfig};
use crate::domain::DisplayDuration;
use crate::message::{Message, MessageId};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;

/// Messages currently displayed, oldest first.
pub type Snapshot = Arc<[Message]>;

/// Commands sent to the surface task.
#[derive(Debug)]
enum Command {
    /// Display time of a message ran out.
    Expire(MessageId),
    /// A user gesture or the application removed a message.
    Dismiss(MessageId, Retirement),
    /// Remove everything.
    Clear,
    /// Reply once every earlier command and delivery has been applied.
    Flush(oneshot::Sender<()>),
    /// Stop the task.
    Detach,
}

/// Placement hints for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub anchor: Anchor,
    pub alignment: Alignment,
}

/// Gesture callbacks for one rendered message.
///
/// Cheap to clone; every method is safe to call after the message is gone.
#[derive(Debug, Clone)]
pub struct Dismisser {
    id: MessageId,
    commands: mpsc::UnboundedSender<Command>,
    swipe: SwipePolicy,
}

impl Dismisser {
    /// The message these callbacks act on.
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Tap-to-dismiss.
    pub fn tap(&self) {
        send(&self.commands, Command::Dismiss(self.id, Retirement::Tapped));
    }

    /// Close button or programmatic dismissal.
    pub fn dismiss(&self) {
        send(&self.commands, Command::Dismiss(self.id, Retirement::Dismissed));
    }

    /// Reports a finished drag. Returns true if it was far enough to dismiss;
    /// otherwise the message stays and its timer keeps running.
    pub fn swipe(&self, gesture: SwipeGesture) -> bool {
        let commit = self.swipe.commits(gesture);
        if commit {
            send(&self.commands, Command::Dismiss(self.id, Retirement::Swiped));
        }
        commit
    }
}

/// A display surface attached to a bus channel.
///
/// Dropping it (or calling [`DisplaySurface::detach`]) unsubscribes from the
/// channel and stops its task. Pending expiry timers then fire into nothing.
#[derive(Debug)]
pub struct DisplaySurface {
    bus: MessageBus,
    subscription: SubscriptionHandle,
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<Snapshot>,
    swipe: SwipePolicy,
    layout: Layout,
}

impl DisplaySurface {
    /// Subscribes to `config.channel` and starts the surface task.
    ///
    /// Messages published after this returns are received. Must be called
    /// from within a Tokio runtime.
    pub fn attach(bus: &MessageBus, config: &SurfaceConfig) -> Self {
        let channel = config.channel_id();
        let subscription = bus.subscribe(&channel);
        let handle = subscription.handle();

        let (commands, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(Snapshot::from(Vec::new()));

        let policy = AdmissionPolicy::new(config.max_displayed(), config.allow_duplicates);
        let controller = Controller {
            channel,
            queue: QueueState::new(policy),
            duration: config.duration(),
            commands: commands.downgrade(),
            published: state_tx,
        };
        tokio::spawn(controller.run(subscription, command_rx));

        Self {
            bus: bus.clone(),
            subscription: handle,
            commands,
            state,
            swipe: SwipePolicy::from_config(config),
            layout: Layout {
                anchor: config.anchor,
                alignment: config.alignment,
            },
        }
    }

    /// Calls `view` once per displayed message, oldest first, and collects
    /// the rendered elements.
    pub fn render<R>(&self, mut view: impl FnMut(&Message, Dismisser) -> R) -> Vec<R> {
        let snapshot = self.snapshot();
        snapshot
            .iter()
            .map(|message| view(message, self.dismisser(message.id())))
            .collect()
    }

    /// Gesture callbacks for the message with `id`.
    #[must_use]
    pub fn dismisser(&self, id: MessageId) -> Dismisser {
        Dismisser {
            id,
            commands: self.commands.clone(),
            swipe: self.swipe,
        }
    }

    /// Retires `id` as if its timer fired. No-op if it is already gone.
    pub fn expire(&self, id: MessageId) {
        send(&self.commands, Command::Expire(id));
    }

    /// Tap-to-dismiss for `id`.
    pub fn tap(&self, id: MessageId) {
        self.dismisser(id).tap();
    }

    /// Swipe-to-dismiss for `id`; see [`Dismisser::swipe`].
    pub fn swipe(&self, id: MessageId, gesture: SwipeGesture) -> bool {
        self.dismisser(id).swipe(gesture)
    }

    /// Removes every displayed message.
    pub fn clear(&self) {
        send(&self.commands, Command::Clear);
    }

    /// Waits until every payload published and every command issued before
    /// this call has been applied.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        send(&self.commands, Command::Flush(tx));
        let _ = rx.await;
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// A receiver notified after each mutation.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Snapshot> {
        self.state.clone()
    }

    /// Placement hints from the configuration.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Unsubscribes and stops the surface task.
    pub fn detach(self) {}
}

impl Drop for DisplaySurface {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.subscription);
        let _ = self.commands.send(Command::Detach);
    }
}

fn send(commands: &mpsc::UnboundedSender<Command>, command: Command) {
    if let Err(err) = commands.send(command) {
        tracing::trace!(command = ?err.0, "display surface is gone, command dropped");
    }
}

/// State owned by the surface task.
struct Controller {
    channel: ChannelId,
    queue: QueueState,
    duration: DisplayDuration,
    /// Weak so that timers do not keep a detached surface alive.
    commands: mpsc::WeakUnboundedSender<Command>,
    published: watch::Sender<Snapshot>,
}

impl Controller {
    async fn run(
        mut self,
        mut subscription: Subscription,
        mut command_rx: mpsc::UnboundedReceiver<Command>,
    ) {
        tracing::debug!(channel = %self.channel, "display surface attached");
        loop {
            // Unbiased: a flood of deliveries cannot starve taps and expiries.
            tokio::select! {
                payload = subscription.recv() => match payload {
                    Some(payload) => self.on_payload(payload),
                    None => break,
                },
                command = command_rx.recv() => match command {
                    Some(Command::Detach) | None => break,
                    Some(Command::Flush(reply)) => {
                        self.drain_queued(&mut subscription);
                        let _ = reply.send(());
                    }
                    Some(command) => self.on_command(command),
                },
            }
        }
        tracing::debug!(channel = %self.channel, "display surface detached");
    }

    /// Applies the deliveries queued right now, so a flush covers every
    /// payload published before it. Later arrivals are left to the loop.
    fn drain_queued(&mut self, subscription: &mut Subscription) {
        for _ in 0..subscription.len() {
            match subscription.try_recv() {
                Some(payload) => self.on_payload(payload),
                None => break,
            }
        }
    }

    fn on_payload(&mut self, payload: Payload) {
        match payload.as_message() {
            Some(message) => self.on_arrive(message.clone()),
            None => tracing::warn!(
                channel = %self.channel,
                payload = payload.type_name(),
                "unexpected payload on message channel, ignored"
            ),
        }
    }

    fn on_arrive(&mut self, message: Message) {
        let id = message.id();
        match self.queue.arrive(message) {
            Admission::Admitted { evicted } => {
                for old in &evicted {
                    log_retired(&self.channel, old.id(), Retirement::Evicted);
                }
                tracing::debug!(channel = %self.channel, %id, "message displayed");
                self.start_timer(id);
                self.publish();
            }
            Admission::Duplicate { existing } => {
                tracing::debug!(channel = %self.channel, %id, %existing, "duplicate message suppressed");
            }
            Admission::AlreadySeen => {
                tracing::debug!(channel = %self.channel, %id, "message already shown, ignored");
            }
        }
    }

    fn on_command(&mut self, command: Command) {
        match command {
            Command::Expire(id) => {
                if self.queue.expire(id).is_some() {
                    log_retired(&self.channel, id, Retirement::Expired);
                    self.publish();
                }
            }
            Command::Dismiss(id, reason) => self.retire(id, reason),
            Command::Clear => {
                let cleared = self.queue.clear();
                if !cleared.is_empty() {
                    for message in &cleared {
                        log_retired(&self.channel, message.id(), Retirement::Cleared);
                    }
                    self.publish();
                }
            }
            Command::Flush(_) | Command::Detach => {}
        }
    }

    fn retire(&mut self, id: MessageId, reason: Retirement) {
        if self.queue.remove(id).is_some() {
            log_retired(&self.channel, id, reason);
            self.publish();
        }
    }

    /// Schedules `Expire(id)`. The timer is never cancelled; if the message
    /// leaves earlier the expiry finds nothing to remove.
    fn start_timer(&self, id: MessageId) {
        let Some(commands) = self.commands.upgrade() else {
            return;
        };
        let deadline = Instant::now() + self.duration.as_duration();
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = commands.send(Command::Expire(id));
        });
    }

    fn publish(&self) {
        self.published.send_replace(self.queue.snapshot());
    }
}

fn log_retired(channel: &ChannelId, id: MessageId, reason: Retirement) {
    tracing::debug!(%channel, %id, ?reason, "message removed");
}
