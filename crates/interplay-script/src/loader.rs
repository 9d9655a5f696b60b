//! RON content loader

use crate::error::{Error, Result};
use crate::scene::Scene;
use crate::schema::conditions::{ConditionDef, ConditionDefs};
use crate::schema::interactables::InteractableDefs;
use crate::schema::ron_options;
use interplay_core::{
    ConditionId, ConditionRegistry, Interactable, LevelGroup, Reaction, Session,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A condition reference in authored content that names no defined condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    /// Interactable holding the reference
    pub interactable: String,
    /// Where inside the interactable, e.g. `group "unlocked"`
    pub location: String,
    pub id: ConditionId,
}

/// Loaded content definitions
#[derive(Debug, Default)]
pub struct Defs {
    /// Condition definitions by ID
    pub conditions: BTreeMap<ConditionId, ConditionDef>,
    /// Level groups in load order
    pub level_groups: Vec<LevelGroup>,
    /// Interactables by name
    pub interactables: BTreeMap<String, Interactable>,
}

impl Defs {
    /// Create empty definitions
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a condition definition
    pub fn get_condition(&self, id: ConditionId) -> Option<&ConditionDef> {
        self.conditions.get(&id)
    }

    /// Get an interactable definition
    pub fn get_interactable(&self, name: &str) -> Option<&Interactable> {
        self.interactables.get(name)
    }

    /// Every group reference or condition reaction naming an undefined condition
    pub fn unresolved_references(&self) -> Vec<UnresolvedRef> {
        let mut unresolved = Vec::new();
        for interactable in self.interactables.values() {
            let mut check = |location: String, id: ConditionId| {
                if !self.conditions.contains_key(&id) {
                    unresolved.push(UnresolvedRef {
                        interactable: interactable.name.clone(),
                        location,
                        id,
                    });
                }
            };

            for group in &interactable.groups {
                for condition_ref in &group.conditions {
                    check(format!("group {:?}", group.description), condition_ref.id);
                }
            }

            let chains = interactable
                .groups
                .iter()
                .filter_map(|g| g.chain.as_ref())
                .chain(interactable.default_chain.as_ref());
            for chain in chains {
                for reaction in &chain.reactions {
                    if let Reaction::Condition(r) = reaction {
                        check(format!("chain {:?}", chain.description), r.condition);
                    }
                }
            }
        }
        unresolved
    }

    /// Build a session and initialized interactables from these definitions
    ///
    /// Unresolved references are logged, not rejected; they fail closed at
    /// trigger time.
    pub fn build(self) -> Result<Scene> {
        for missing in self.unresolved_references() {
            warn!(
                "{} ({}) references undefined {}",
                missing.interactable, missing.location, missing.id
            );
        }

        let mut registry = ConditionRegistry::new();
        for def in self.conditions.into_values() {
            registry.register(def.into())?;
        }
        for group in self.level_groups {
            if let Some(id) = group.conditions.iter().find(|id| registry.get(**id).is_none()) {
                warn!("level group {:?} lists undefined {}", group.title, id);
            }
            registry.define_level_group(group);
        }

        let mut interactables = self.interactables;
        for interactable in interactables.values_mut() {
            interactable.init()?;
        }

        debug!(
            "built scene with {} conditions and {} interactables",
            registry.len(),
            interactables.len()
        );
        Ok(Scene::new(Session::with_conditions(registry), interactables))
    }
}

/// Loader for RON content files
pub struct Loader {
    defs: Defs,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self { defs: Defs::new() }
    }

    /// Load a single RON file
    ///
    /// A file name mentioning `interactable` or `condition` decides the kind.
    /// Otherwise the top-level key does.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        if filename.contains("interactable") {
            return self.load_interactables_str(&content);
        }
        if filename.contains("condition") {
            return self.load_conditions_str(&content);
        }

        if let Ok(file) = ron_options().from_str::<InteractableDefs>(&content) {
            return self.add_interactables(file);
        }
        if let Ok(file) = ron_options().from_str::<ConditionDefs>(&content) {
            return self.add_conditions(file);
        }
        Err(Error::InvalidSchema(format!(
            "{}: expected `conditions:` or `interactables:` at top level",
            path.display()
        )))
    }

    /// Load conditions and level groups from a RON string
    pub fn load_conditions_str(&mut self, content: &str) -> Result<()> {
        let file: ConditionDefs = ron_options().from_str(content)?;
        self.add_conditions(file)
    }

    /// Load interactables from a RON string
    pub fn load_interactables_str(&mut self, content: &str) -> Result<()> {
        let file: InteractableDefs = ron_options().from_str(content)?;
        self.add_interactables(file)
    }

    fn add_conditions(&mut self, file: ConditionDefs) -> Result<()> {
        for condition in file.conditions {
            let id = condition.id;
            if self.defs.conditions.contains_key(&id) {
                return Err(Error::DuplicateDefinition(id.to_string()));
            }
            self.defs.conditions.insert(id, condition);
        }
        for group in file.level_groups {
            if self.defs.level_groups.iter().any(|g| g.title == group.title) {
                return Err(Error::DuplicateDefinition(format!("level group {}", group.title)));
            }
            self.defs.level_groups.push(group);
        }
        Ok(())
    }

    fn add_interactables(&mut self, file: InteractableDefs) -> Result<()> {
        for interactable in file.interactables {
            let name = interactable.name.clone();
            if name.is_empty() {
                return Err(Error::InvalidSchema("interactable without a name".to_string()));
            }
            if self.defs.interactables.contains_key(&name) {
                return Err(Error::DuplicateDefinition(name));
            }
            self.defs.interactables.insert(name, interactable);
        }
        Ok(())
    }

    /// Load every `.ron` file under a directory
    ///
    /// Files load in path order, so conditions and interactables may be
    /// spread over nested folders in any layout.
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(Error::InvalidSchema(format!(
                "{}: not a content directory",
                path.display()
            )));
        }

        let mut files = Vec::new();
        collect_ron_files(path, &mut files)?;
        files.sort();
        debug!("loading {} content files from {}", files.len(), path.display());

        files.iter().try_for_each(|file| self.load_file(file))
    }

    /// Finish loading and return the definitions
    pub fn finish(self) -> Defs {
        self.defs
    }

    /// Get the current definitions (for inspection during loading)
    pub fn defs(&self) -> &Defs {
        &self.defs
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_ron_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_ron_files(&path, files)?;
        } else if path.extension().is_some_and(|e| e == "ron") {
            files.push(path);
        }
    }
    Ok(())
}
