use indexmap::IndexSet;
use oxc_ast::ast::{
    Argument, AssignmentTargetPropertyIdentifier, BinaryExpression, BinaryOperator,
    CallExpression, ComputedMemberExpression, Expression, PropertyKey, StaticMemberExpression,
};
use oxc_ast_visit::{Visit, walk};
use rustc_hash::FxHashSet;

use super::PropertyManglePolicy;

/// Result of a collection pass.
pub(super) struct CollectedNames {
    /// Names to rename, in first-seen order.
    pub candidates: IndexSet<String>,
    /// Property names that stay as they are.
    pub unmangled: FxHashSet<String>,
}

pub(super) struct PropertyCollector<'p> {
    policy: &'p PropertyManglePolicy,
    keep_quoted: bool,
    candidates: IndexSet<String>,
    unmangled: FxHashSet<String>,
    pinned: FxHashSet<String>,
}

impl<'p> PropertyCollector<'p> {
    pub fn new(policy: &'p PropertyManglePolicy, keep_quoted: bool) -> Self {
        Self {
            policy,
            keep_quoted,
            candidates: IndexSet::default(),
            unmangled: FxHashSet::default(),
            pinned: FxHashSet::default(),
        }
    }

    pub fn finish(mut self) -> CollectedNames {
        let pinned = self.pinned;
        self.candidates.retain(|name| !pinned.contains(name));
        self.unmangled.extend(pinned);
        CollectedNames {
            candidates: self.candidates,
            unmangled: self.unmangled,
        }
    }

    fn record(&mut self, name: &str) {
        if self.policy.should_mangle(name) {
            if !self.candidates.contains(name) {
                self.candidates.insert(name.to_string());
            }
        } else {
            self.unmangled.insert(name.to_string());
        }
    }

    fn record_quoted(&mut self, name: &str) {
        if self.keep_quoted {
            self.pinned.insert(name.to_string());
        } else {
            self.record(name);
        }
    }
}

impl<'a> Visit<'a> for PropertyCollector<'_> {
    fn visit_static_member_expression(&mut self, it: &StaticMemberExpression<'a>) {
        self.record(it.property.name.as_str());
        walk::walk_static_member_expression(self, it);
    }

    fn visit_computed_member_expression(&mut self, it: &ComputedMemberExpression<'a>) {
        if let Expression::StringLiteral(lit) = &it.expression {
            self.record_quoted(lit.value.as_str());
        }
        walk::walk_computed_member_expression(self, it);
    }

    fn visit_property_key(&mut self, it: &PropertyKey<'a>) {
        match it {
            PropertyKey::StaticIdentifier(ident) => self.record(ident.name.as_str()),
            PropertyKey::StringLiteral(lit) => self.record_quoted(lit.value.as_str()),
            _ => {}
        }
        walk::walk_property_key(self, it);
    }

    fn visit_assignment_target_property_identifier(
        &mut self,
        it: &AssignmentTargetPropertyIdentifier<'a>,
    ) {
        self.record(it.binding.name.as_str());
        walk::walk_assignment_target_property_identifier(self, it);
    }

    fn visit_binary_expression(&mut self, it: &BinaryExpression<'a>) {
        if it.operator == BinaryOperator::In {
            if let Expression::StringLiteral(lit) = &it.left {
                self.record_quoted(lit.value.as_str());
            }
        }
        walk::walk_binary_expression(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if is_define_property(&it.callee) {
            if let Some(Argument::StringLiteral(lit)) = it.arguments.get(1) {
                self.record_quoted(lit.value.as_str());
            }
        }
        walk::walk_call_expression(self, it);
    }
}

/// `Object.defineProperty`, whose second argument names a property.
pub(super) fn is_define_property(callee: &Expression<'_>) -> bool {
    match callee {
        Expression::StaticMemberExpression(member) => {
            member.property.name == "defineProperty"
                && matches!(&member.object, Expression::Identifier(id) if id.name == "Object")
        }
        _ => false,
    }
}
