//! Change-notification dispatch.
//!
//! After a committed checkpoint, the three undo categories (new, changed,
//! removed) each go out once, paired with the union of their impacted
//! accounts. Removed objects travel with their pre-images so consumers can
//! archive them. No retry and no persistence; consumers own their
//! durability.

use std::collections::BTreeSet;

use crate::db::Database;
use crate::impact::{get_relevant_accounts, ImpactOptions};
use crate::state::object::{AccountId, ObjectId, StoredObject};

pub trait ChangeSubscriber {
    fn on_objects_new(&mut self, ids: &[ObjectId], impacted: &BTreeSet<AccountId>);
    fn on_objects_changed(&mut self, ids: &[ObjectId], impacted: &BTreeSet<AccountId>);
    fn on_objects_removed(
        &mut self,
        ids: &[ObjectId],
        objects: &[StoredObject],
        impacted: &BTreeSet<AccountId>,
    );
}

/// Deliver the head checkpoint's changes. Each category is dispatched only
/// if non-empty.
pub fn notify_changed_objects(
    db: &Database,
    options: &ImpactOptions,
    subscriber: &mut dyn ChangeSubscriber,
) {
    let head = db.undo_head();

    if !head.new_ids.is_empty() {
        let mut ids = Vec::with_capacity(head.new_ids.len());
        let mut impacted = BTreeSet::new();
        for id in &head.new_ids {
            ids.push(*id);
            if let Some(object) = db.find_object(*id) {
                get_relevant_accounts(&object, &mut impacted, options);
            }
        }
        subscriber.on_objects_new(&ids, &impacted);
    }

    if !head.old_values.is_empty() {
        let mut ids = Vec::with_capacity(head.old_values.len());
        let mut impacted = BTreeSet::new();
        for (id, pre_image) in &head.old_values {
            ids.push(*id);
            get_relevant_accounts(pre_image, &mut impacted, options);
        }
        subscriber.on_objects_changed(&ids, &impacted);
    }

    if !head.removed.is_empty() {
        let mut ids = Vec::with_capacity(head.removed.len());
        let mut objects = Vec::with_capacity(head.removed.len());
        let mut impacted = BTreeSet::new();
        for (id, pre_image) in &head.removed {
            ids.push(*id);
            get_relevant_accounts(pre_image, &mut impacted, options);
            objects.push(pre_image.clone());
        }
        subscriber.on_objects_removed(&ids, &objects, &impacted);
    }
}
