//! Module dependency graph
//!
//! Records which modules imported from which, so the registry can report a
//! dependencies-first load order and find cycles in what it has seen.

use crate::error::{RegistryError, RegistryResult};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Import edges between modules
///
/// Ordered maps keep traversal, and therefore reported cycles and load
/// orders, deterministic.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Adjacency list: module -> modules it imports from
    edges: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module with no dependencies (no-op if present)
    pub fn add_module(&mut self, module: &str) {
        if !self.edges.contains_key(module) {
            self.edges.insert(module.to_string(), Vec::new());
        }
    }

    /// Record that `module` imports from `depends_on`
    ///
    /// Duplicate edges are ignored.
    pub fn add_dependency(&mut self, module: &str, depends_on: &str) {
        self.add_module(depends_on);
        let deps = self.edges.entry(module.to_string()).or_default();
        if !deps.iter().any(|d| d == depends_on) {
            deps.push(depends_on.to_string());
        }
    }

    /// Replace the dependency list of `module`
    pub fn set_dependencies<'a>(&mut self, module: &str, depends_on: impl IntoIterator<Item = &'a str>) {
        let mut deps: Vec<String> = Vec::new();
        for dep in depends_on {
            self.add_module(dep);
            if !deps.iter().any(|d| d == dep) {
                deps.push(dep.to_string());
            }
        }
        self.edges.insert(module.to_string(), deps);
    }

    /// Drop `module` and its outgoing edges
    ///
    /// Edges other modules hold toward it are kept.
    pub fn remove_module(&mut self, module: &str) -> Option<Vec<String>> {
        self.edges.remove(module)
    }

    /// Find a cycle, returned as a path whose first and last entries are equal
    pub fn detect_cycle(&self) -> Option<Vec<String>> {
        let mut visited = BTreeSet::new();
        let mut on_stack = BTreeSet::new();
        let mut path = Vec::new();

        for module in self.edges.keys() {
            if !visited.contains(module.as_str()) {
                if let Some(cycle) = self.dfs_cycle(module, &mut visited, &mut on_stack, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }

    fn dfs_cycle<'a>(
        &'a self,
        node: &'a str,
        visited: &mut BTreeSet<&'a str>,
        on_stack: &mut BTreeSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        visited.insert(node);
        on_stack.insert(node);
        path.push(node);

        if let Some(neighbors) = self.edges.get(node) {
            for neighbor in neighbors {
                if on_stack.contains(neighbor.as_str()) {
                    let start = path.iter().position(|m| *m == neighbor).unwrap_or(0);
                    let mut cycle: Vec<String> = path[start..].iter().map(|m| m.to_string()).collect();
                    cycle.push(neighbor.clone());
                    return Some(cycle);
                }
                if !visited.contains(neighbor.as_str()) {
                    if let Some(cycle) = self.dfs_cycle(neighbor, visited, on_stack, path) {
                        return Some(cycle);
                    }
                }
            }
        }

        on_stack.remove(node);
        path.pop();
        None
    }

    /// Modules in dependency order (dependencies before dependents)
    pub fn topological_sort(&self) -> RegistryResult<Vec<String>> {
        if let Some(cycle) = self.detect_cycle() {
            return Err(RegistryError::CircularDependency(cycle));
        }

        // Kahn's algorithm over the reversed edges (dependency -> dependent)
        let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
        let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for (module, deps) in &self.edges {
            *in_degree.entry(module).or_insert(0) += deps.len();
            for dep in deps {
                in_degree.entry(dep).or_insert(0);
                dependents.entry(dep).or_default().push(module);
            }
        }

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(module, _)| *module)
            .collect();

        let mut order = Vec::with_capacity(in_degree.len());
        while let Some(module) = queue.pop_front() {
            order.push(module.to_string());
            for dependent in dependents.get(module).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(*dependent);
                    }
                }
            }
        }

        Ok(order)
    }

    /// Direct dependencies of `module`
    pub fn dependencies(&self, module: &str) -> Option<&[String]> {
        self.edges.get(module).map(Vec::as_slice)
    }

    /// Modules that import directly from `module`
    pub fn dependents(&self, module: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|(_, deps)| deps.iter().any(|d| d == module))
            .map(|(m, _)| m.as_str())
            .collect()
    }

    /// All modules in the graph, sorted
    pub fn modules(&self) -> Vec<&str> {
        self.edges.keys().map(String::as_str).collect()
    }

    /// Whether the graph is empty
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of modules
    pub fn len(&self) -> usize {
        self.edges.len()
    }
}
