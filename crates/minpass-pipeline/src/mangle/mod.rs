//! Property mangling.
//!
//! Renames object property names that match an inclusion pattern to short
//! generated names. The pass runs on the parsed program before compression:
//!
//! 1. [`collect::PropertyCollector`] finds every mangleable name in the
//!    artifact and every name that has to stay as-is.
//! 2. The shared [`NameCache`] assigns a short name to each mangleable name,
//!    reusing assignments made for earlier artifacts of the same run.
//! 3. [`rename::PropertyRenamer`] rewrites the AST.

mod cache;
mod collect;
mod policy;
mod rename;

pub use cache::{NameCache, SharedNameCache, short_name};
pub use policy::PropertyManglePolicy;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_ast_visit::{Visit, VisitMut};
use rustc_hash::FxHashMap;

use collect::PropertyCollector;
use rename::PropertyRenamer;

/// Mangle the properties of `program` in place.
///
/// Returns the number of rewritten property sites.
pub fn mangle_properties<'a>(
    allocator: &'a Allocator,
    program: &mut Program<'a>,
    policy: &PropertyManglePolicy,
    keep_quoted: bool,
    cache: &SharedNameCache,
) -> usize {
    let mut collector = PropertyCollector::new(policy, keep_quoted);
    collector.visit_program(program);
    let names = collector.finish();

    if names.candidates.is_empty() {
        return 0;
    }

    let mapping: FxHashMap<String, String> = {
        let mut cache = cache.lock();
        names
            .candidates
            .iter()
            .map(|name| {
                let short = cache.assign(name, &names.unmangled, policy);
                (name.clone(), short)
            })
            .collect()
    };

    let mut renamer = PropertyRenamer::new(allocator, &mapping, keep_quoted);
    renamer.visit_program(program);

    tracing::debug!(
        candidates = names.candidates.len(),
        sites = renamer.renamed(),
        "Mangled properties"
    );

    renamer.renamed()
}
