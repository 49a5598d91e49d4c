// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operation applier.
//
// Maps each decoded operation onto the editor mutation its action implies.
// Applying never commits: the caller applies every operation of one bridge
// call to the same editor and then calls `apply()` on it exactly once.

use pushbridge_core::operations::{
    AttributeOperation, AttributeValue, ScopedSubscriptionListOperation, SubscriptionAction,
    SubscriptionListOperation, TagAction, TagGroupAction, TagGroupOperation, TagOperation,
};

use crate::traits::{
    AttributeEditor, ScopedSubscriptionListEditor, SubscriptionListEditor, TagEditor,
    TagGroupEditor,
};

/// An operation that knows how to mutate editor `E`.
pub trait ApplyTo<E: ?Sized> {
    fn apply_to(&self, editor: &mut E);
}

/// Apply every operation in order to the same editor.
pub fn apply_all<E, O>(operations: &[O], editor: &mut E)
where
    E: ?Sized,
    O: ApplyTo<E>,
{
    for operation in operations {
        operation.apply_to(editor);
    }
}

impl<E: TagEditor + ?Sized> ApplyTo<E> for TagOperation {
    fn apply_to(&self, editor: &mut E) {
        match self.action {
            TagAction::Add => editor.add_tags(&self.tags),
            TagAction::Remove => editor.remove_tags(&self.tags),
        }
    }
}

impl<E: TagGroupEditor + ?Sized> ApplyTo<E> for TagGroupOperation {
    fn apply_to(&self, editor: &mut E) {
        match self.action {
            TagGroupAction::Add => editor.add_tags(&self.group, &self.tags),
            TagGroupAction::Remove => editor.remove_tags(&self.group, &self.tags),
            TagGroupAction::Set => editor.set_tags(&self.group, &self.tags),
        }
    }
}

impl<E: AttributeEditor + ?Sized> ApplyTo<E> for AttributeOperation {
    fn apply_to(&self, editor: &mut E) {
        match self {
            Self::Remove { key } => editor.remove(key),
            Self::Set { key, value } => match value {
                AttributeValue::String(s) => editor.set_string(key, s),
                AttributeValue::Number(n) => editor.set_double(key, *n),
                AttributeValue::Date(d) => editor.set_date(key, *d),
            },
        }
    }
}

impl<E: SubscriptionListEditor + ?Sized> ApplyTo<E> for SubscriptionListOperation {
    fn apply_to(&self, editor: &mut E) {
        match self.action {
            SubscriptionAction::Subscribe => editor.subscribe(&self.list_id),
            SubscriptionAction::Unsubscribe => editor.unsubscribe(&self.list_id),
        }
    }
}

impl<E: ScopedSubscriptionListEditor + ?Sized> ApplyTo<E> for ScopedSubscriptionListOperation {
    fn apply_to(&self, editor: &mut E) {
        match self.action {
            SubscriptionAction::Subscribe => editor.subscribe(&self.list_id, self.scope),
            SubscriptionAction::Unsubscribe => editor.unsubscribe(&self.list_id, self.scope),
        }
    }
}
