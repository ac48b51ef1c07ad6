//! Rules for assemblies, modules, unit references and unit-level resources.
//!
//! The module rule is the only place where traversal order and list order part ways. Types
//! are reached through the namespace tree, but the module's flat type list must come out in
//! its original order. Every type definition rule records itself in the context's flat type
//! list; the module collects that list and rebuilds `all_types` from it afterwards.

use std::collections::{HashMap, HashSet};

use crate::{
    metadata::{
        kinds::NodeKind,
        node_id::NodeId,
        nodes::{
            types::TypeDefinitionCore,
            units::{
                AssemblyDefinition, AssemblyReference, ModuleCore, ModuleReference,
                ResourceReference,
            },
        },
    },
    rewriter::{
        cache::CacheTable,
        context::FlatTypes,
        rules::{map_required, require, visit},
        Rewriter,
    },
    Result,
};

/// Rewrites an assembly: its manifest slots, then everything a module holds.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_assembly<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let assembly = read_node!(rw, AssemblyDefinition, copy)?.clone();
        write_slot!(rw, AssemblyDefinition, copy,
            assembly_attributes = rw.rewrite_custom_attributes(&assembly.assembly_attributes)?);
        write_slot!(rw, AssemblyDefinition, copy,
            exported_types = rw.rewrite_aliases(&assembly.exported_types)?);
        write_slot!(rw, AssemblyDefinition, copy,
            files = rw.rewrite_file_references(&assembly.files)?);
        write_slot!(rw, AssemblyDefinition, copy,
            member_modules = rw.rewrite_member_modules(&assembly.member_modules)?);
        write_slot!(rw, AssemblyDefinition, copy,
            resources = rw.rewrite_resource_references(&assembly.resources)?);
        write_slot!(rw, AssemblyDefinition, copy,
            security_attributes = rw.rewrite_security_attributes(&assembly.security_attributes)?);

        walk_module_slots(rw, copy)
    })
}

/// Rewrites a module that is not an assembly manifest.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_module<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, walk_module_slots)
}

fn walk_module_slots<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let outer = rw.context_mut().take_flat_types();
    let walked = walk_module_members(rw, copy);
    let flat = rw.context_mut().restore_flat_types(outer);
    walked?;

    restore_module_lists(rw, copy, &flat)
}

fn walk_module_members<R: Rewriter + ?Sized>(rw: &mut R, copy: NodeId) -> Result<()> {
    let module = read_node!(rw, ModuleCore, copy)?.clone();
    write_slot!(rw, ModuleCore, copy,
        assembly_references = rw.rewrite_assembly_references(&module.assembly_references)?);
    write_slot!(rw, ModuleCore, copy,
        module_attributes = rw.rewrite_custom_attributes(&module.module_attributes)?);
    write_slot!(rw, ModuleCore, copy,
        module_references = rw.rewrite_module_references(&module.module_references)?);
    write_slot!(rw, ModuleCore, copy,
        win32_resources = rw.rewrite_win32_resources(&module.win32_resources)?);

    require(rw, module.root_namespace, |kind| kind == NodeKind::RootNamespace, "root namespace")?;
    write_slot!(rw, ModuleCore, copy,
        root_namespace = rw.rewrite_root_namespace(module.root_namespace)?);

    walk_private_helper_members(rw)?;

    write_slot!(rw, ModuleCore, copy,
        entry_point = rw.context_mut().cached_or_unchanged(module.entry_point));
    Ok(())
}

// Helper members hang off their type but are rewritten once all regular members are done.
// The flat list may grow while this runs, when a helper is itself a nested type.
fn walk_private_helper_members<R: Rewriter + ?Sized>(rw: &mut R) -> Result<()> {
    let mut index = 0;
    while let Some(&(_, ty)) = rw.context().flat_type_entries().get(index) {
        index += 1;

        let graph = rw.context().graph();
        if ty.is_dummy() || graph.is_frozen(ty)? || !graph.kind(ty)?.is_type_definition() {
            continue;
        }
        let helpers = read_node!(rw, TypeDefinitionCore, ty)?
            .private_helper_members
            .clone();
        if helpers.is_empty() {
            continue;
        }

        rw.context_mut().enter(ty)?;
        let rewritten = rw.rewrite_type_members(&helpers);
        rw.context_mut().leave();
        write_slot!(rw, TypeDefinitionCore, ty, private_helper_members = rewritten?);
    }
    Ok(())
}

fn restore_module_lists<R: Rewriter + ?Sized>(
    rw: &mut R,
    copy: NodeId,
    flat: &FlatTypes,
) -> Result<()> {
    let module = read_node!(rw, ModuleCore, copy)?.clone();
    let stopped = rw.context().is_stopped();

    let all_types = reached_types(&module.all_types, flat, stopped);
    write_slot!(rw, ModuleCore, copy, all_types = all_types);

    write_slot!(rw, ModuleCore, copy,
        type_member_references = survivors(rw, &module.type_member_references, stopped)?);
    write_slot!(rw, ModuleCore, copy,
        type_references = survivors(rw, &module.type_references, stopped)?);
    Ok(())
}

// Types the traversal reached, ordered by their original position in `listed`. Types that
// were never listed follow in encounter order. After a stop, listed types the traversal did
// not get to are kept as they are.
fn reached_types(listed: &[NodeId], flat: &FlatTypes, stopped: bool) -> Vec<NodeId> {
    let position: HashMap<NodeId, usize> = listed
        .iter()
        .enumerate()
        .map(|(index, &ty)| (ty, index))
        .collect();

    let mut ordered: Vec<(usize, NodeId)> = Vec::with_capacity(flat.entries.len());
    let mut appended = Vec::new();
    for &(original, rewritten) in &flat.entries {
        match position.get(&original) {
            Some(&index) => ordered.push((index, rewritten)),
            None => appended.push(rewritten),
        }
    }

    if stopped {
        let reached: HashSet<NodeId> = flat.entries.iter().map(|&(original, _)| original).collect();
        ordered.extend(
            listed
                .iter()
                .enumerate()
                .filter(|(_, ty)| !reached.contains(ty))
                .map(|(index, &ty)| (index, ty)),
        );
    }

    ordered.sort_by_key(|&(index, _)| index);
    ordered
        .into_iter()
        .map(|(_, ty)| ty)
        .chain(appended)
        .filter(|ty| !ty.is_dummy())
        .collect()
}

// Reference list entries that have a rewrite in the cache, mapped to it, in original order.
// Entries rewritten to the sentinel are dropped. After a stop, unreached entries are kept.
fn survivors<R: Rewriter + ?Sized>(rw: &R, items: &[NodeId], stopped: bool) -> Result<Vec<NodeId>> {
    let context = rw.context();
    let mut kept = Vec::with_capacity(items.len());
    for &item in items {
        if item.is_dummy() {
            continue;
        }
        let table = CacheTable::for_kind(context.graph().kind(item)?);
        let rewritten = match context.cache().peek(table, item) {
            Some(rewritten) => rewritten,
            None if stopped => item,
            None => continue,
        };
        if !rewritten.is_dummy() {
            kept.push(rewritten);
        }
    }
    Ok(kept)
}

/// Rewrites an assembly reference. The resolved assembly is replaced by its working copy if
/// the pass produced one.
///
/// # Errors
/// Propagates graph access errors.
pub fn walk_assembly_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let resolved = read_node!(rw, AssemblyReference, copy)?.resolved_assembly;
        write_slot!(rw, AssemblyReference, copy,
            resolved_assembly = rw.context_mut().cached_or_unchanged(resolved));
        Ok(())
    })
}

/// Rewrites a module reference. The resolved module is replaced by its working copy if the
/// pass produced one.
///
/// # Errors
/// Propagates graph access errors.
pub fn walk_module_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let resolved = read_node!(rw, ModuleReference, copy)?.resolved_module;
        write_slot!(rw, ModuleReference, copy,
            resolved_module = rw.context_mut().cached_or_unchanged(resolved));
        Ok(())
    })
}

/// Rewrites a manifest resource.
///
/// # Errors
/// Propagates errors of the child rules.
pub fn walk_resource_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |rw, copy| {
        let resource = read_node!(rw, ResourceReference, copy)?.clone();
        write_slot!(rw, ResourceReference, copy,
            attributes = rw.rewrite_custom_attributes(&resource.attributes)?);
        write_slot!(rw, ResourceReference, copy,
            defining_assembly = rw.rewrite_unit_reference(resource.defining_assembly)?);
        Ok(())
    })
}

/// Rewrites a file reference, a leaf.
///
/// # Errors
/// Propagates cache and copy errors.
pub fn walk_file_reference<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |_, _| Ok(()))
}

/// Rewrites a Win32 resource, a leaf.
///
/// # Errors
/// Propagates cache and copy errors.
pub fn walk_win32_resource<R: Rewriter + ?Sized>(rw: &mut R, id: NodeId) -> Result<NodeId> {
    visit(rw, id, |_, _| Ok(()))
}

/// Rewrites the assembly reference list of a module.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not assembly references.
pub fn walk_assembly_references<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::AssemblyReference,
        "assembly references",
        |rw, item| rw.rewrite_assembly_reference(item),
    )
}

/// Rewrites the module reference list of a module.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not module references.
pub fn walk_module_references<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::ModuleReference,
        "module references",
        |rw, item| rw.rewrite_module_reference(item),
    )
}

/// Rewrites the member modules of a multi-module assembly.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not modules.
pub fn walk_member_modules<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::Module,
        "member modules",
        |rw, item| rw.rewrite_module(item),
    )
}

/// Rewrites the manifest resources of an assembly.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not resources.
pub fn walk_resource_references<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::ResourceReference,
        "resources",
        |rw, item| rw.rewrite_resource_reference(item),
    )
}

/// Rewrites the file list of an assembly.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not file references.
pub fn walk_file_references<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::FileReference,
        "files",
        |rw, item| rw.rewrite_file_reference(item),
    )
}

/// Rewrites the Win32 resources of a module.
///
/// # Errors
/// Returns [`crate::Error::Precondition`] for entries that are not Win32 resources.
pub fn walk_win32_resources<R: Rewriter + ?Sized>(
    rw: &mut R,
    items: &[NodeId],
) -> Result<Vec<NodeId>> {
    map_required(
        rw,
        items,
        |kind| kind == NodeKind::Win32Resource,
        "win32 resources",
        |rw, item| rw.rewrite_win32_resource(item),
    )
}
