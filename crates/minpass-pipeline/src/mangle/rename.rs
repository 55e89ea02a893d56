use oxc_allocator::{Allocator, CloneIn};
use oxc_ast::AstBuilder;
use oxc_ast::ast::{
    Argument, AssignmentTarget, AssignmentTargetMaybeDefault, AssignmentTargetProperty,
    BinaryExpression, BinaryOperator, BindingProperty, CallExpression, ComputedMemberExpression,
    Expression, ObjectProperty, PropertyKey, StaticMemberExpression, StringLiteral,
};
use oxc_ast_visit::{VisitMut, walk_mut};
use rustc_hash::FxHashMap;

use super::collect::is_define_property;

pub(super) struct PropertyRenamer<'a, 'm> {
    allocator: &'a Allocator,
    mapping: &'m FxHashMap<String, String>,
    keep_quoted: bool,
    renamed: usize,
}

impl<'a, 'm> PropertyRenamer<'a, 'm> {
    pub fn new(
        allocator: &'a Allocator,
        mapping: &'m FxHashMap<String, String>,
        keep_quoted: bool,
    ) -> Self {
        Self {
            allocator,
            mapping,
            keep_quoted,
            renamed: 0,
        }
    }

    pub fn renamed(&self) -> usize {
        self.renamed
    }

    fn lookup(&mut self, name: &str) -> Option<&'a str> {
        let short = self.mapping.get(name)?;
        self.renamed += 1;
        let short: &'a str = self.allocator.alloc_str(short);
        Some(short)
    }

    fn rename_quoted(&mut self, lit: &mut StringLiteral<'a>) {
        if self.keep_quoted {
            return;
        }
        if let Some(short) = self.lookup(lit.value.as_str()) {
            lit.value = short.into();
            lit.raw = None;
        }
    }

    fn key_is_renamed(&self, key: &PropertyKey<'a>) -> bool {
        match key {
            PropertyKey::StaticIdentifier(ident) => self.mapping.contains_key(ident.name.as_str()),
            _ => false,
        }
    }
}

impl<'a> VisitMut<'a> for PropertyRenamer<'a, '_> {
    fn visit_static_member_expression(&mut self, it: &mut StaticMemberExpression<'a>) {
        if let Some(short) = self.lookup(it.property.name.as_str()) {
            it.property.name = short.into();
        }
        walk_mut::walk_static_member_expression(self, it);
    }

    fn visit_computed_member_expression(&mut self, it: &mut ComputedMemberExpression<'a>) {
        if let Expression::StringLiteral(lit) = &mut it.expression {
            self.rename_quoted(lit);
        }
        walk_mut::walk_computed_member_expression(self, it);
    }

    fn visit_binary_expression(&mut self, it: &mut BinaryExpression<'a>) {
        if it.operator == BinaryOperator::In {
            if let Expression::StringLiteral(lit) = &mut it.left {
                self.rename_quoted(lit);
            }
        }
        walk_mut::walk_binary_expression(self, it);
    }

    fn visit_call_expression(&mut self, it: &mut CallExpression<'a>) {
        if is_define_property(&it.callee) {
            if let Some(Argument::StringLiteral(lit)) = it.arguments.get_mut(1) {
                self.rename_quoted(lit);
            }
        }
        walk_mut::walk_call_expression(self, it);
    }

    // `({ name } = obj)` becomes `({ short: name } = obj)`.
    fn visit_assignment_target_property(&mut self, it: &mut AssignmentTargetProperty<'a>) {
        if let AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(shorthand) = it {
            if self.mapping.contains_key(shorthand.binding.name.as_str()) {
                let ast = AstBuilder::new(self.allocator);
                let span = shorthand.span;
                let key = ast.property_key_static_identifier(
                    shorthand.binding.span,
                    shorthand.binding.name,
                );
                let ident = ast.alloc(shorthand.binding.clone_in(self.allocator));
                let binding = match shorthand.init.take() {
                    Some(init) => ast.assignment_target_maybe_default_assignment_target_with_default(
                        span,
                        AssignmentTarget::AssignmentTargetIdentifier(ident),
                        init,
                    ),
                    None => AssignmentTargetMaybeDefault::AssignmentTargetIdentifier(ident),
                };
                *it = ast.assignment_target_property_assignment_target_property_property(
                    span, key, binding, false,
                );
            }
        }
        walk_mut::walk_assignment_target_property(self, it);
    }

    fn visit_object_property(&mut self, it: &mut ObjectProperty<'a>) {
        if it.shorthand && self.key_is_renamed(&it.key) {
            it.shorthand = false;
        }
        walk_mut::walk_object_property(self, it);
    }

    fn visit_binding_property(&mut self, it: &mut BindingProperty<'a>) {
        if it.shorthand && self.key_is_renamed(&it.key) {
            it.shorthand = false;
        }
        walk_mut::walk_binding_property(self, it);
    }

    fn visit_property_key(&mut self, it: &mut PropertyKey<'a>) {
        match it {
            PropertyKey::StaticIdentifier(ident) => {
                if let Some(short) = self.lookup(ident.name.as_str()) {
                    ident.name = short.into();
                }
            }
            PropertyKey::StringLiteral(lit) => self.rename_quoted(lit),
            _ => {}
        }
        walk_mut::walk_property_key(self, it);
    }
}
