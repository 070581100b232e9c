use crate::{catalog::model::SectionId, foundation::core::FrameIndex};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Emitted once per completed section swap, for "active button" highlighting.
pub struct SectionChange {
    /// Frame on which the swap happened.
    pub frame: FrameIndex,
    /// Section that was showing.
    pub from: SectionId,
    /// Section now showing.
    pub to: SectionId,
    /// Id of the new section.
    pub to_name: String,
    /// Button label of the new section.
    pub label: String,
}

/// Handle returned by [`crate::SectionController::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&SectionChange) + Send>;

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, f: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, f));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    pub(crate) fn notify(&mut self, change: &SectionChange) {
        for (_, f) in &mut self.callbacks {
            f(change);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
