use crate::{config::ProgramEntry, rendering::shaders::ShaderSource};
use hashbrown::HashMap;
use log::{debug, warn};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::sync::{Arc, Condvar, Mutex};

#[derive(Debug)]
pub enum ResourceState {
    Loading,
    Loaded(ShaderSource),
    Failed(String),
}

impl ResourceState {
    pub fn is_loaded(&self) -> bool {
        if let ResourceState::Loaded(_) = self {
            true
        } else {
            false
        }
    }

    pub fn is_loading(&self) -> bool {
        if let ResourceState::Loading = self {
            true
        } else {
            false
        }
    }
}

struct Slot {
    // Bumped every time the name is queued; a job only stores its result
    // while its generation is still current.
    generation: u64,
    state: Arc<ResourceState>,
}

#[derive(Default)]
struct Shared {
    states: Mutex<HashMap<String, Slot>>,
    changed: Condvar,
}

impl Shared {
    fn queue(&self, name: &str) -> u64 {
        let mut states = self.states.lock().unwrap();
        let generation = match states.get(name) {
            Some(slot) => {
                warn!("Program \"{}\" queued again, replacing it", name);
                slot.generation + 1
            }
            None => 0,
        };

        states.insert(
            name.to_owned(),
            Slot {
                generation,
                state: Arc::new(ResourceState::Loading),
            },
        );
        generation
    }

    /// Stores `state` unless `name` was queued again since `generation`.
    fn finish(&self, name: &str, generation: u64, state: ResourceState) -> bool {
        let mut states = self.states.lock().unwrap();
        let stored = match states.get_mut(name) {
            Some(slot) if slot.generation == generation => {
                slot.state = Arc::new(state);
                true
            }
            _ => {
                debug!("Dropping outdated sources of \"{}\"", name);
                false
            }
        };

        self.changed.notify_all();
        stored
    }
}

/// Reads program sources in the background. Only file IO happens off-thread,
/// compiling is left to whoever owns the GL context.
pub struct Resources {
    shared: Arc<Shared>,
    pool: ThreadPool,
}

impl Resources {
    pub fn new() -> Result<Self, ThreadPoolBuildError> {
        Resources::with_threads(0)
    }

    /// `0` lets rayon pick the thread count.
    pub fn with_threads(num_threads: usize) -> Result<Self, ThreadPoolBuildError> {
        Ok(Resources {
            shared: Arc::new(Shared::default()),
            pool: ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .thread_name(|i| format!("lumen-io-{}", i))
                .build()?,
        })
    }

    pub fn add_program(&self, entry: &ProgramEntry) {
        let name = entry.name.clone();
        let generation = self.shared.queue(&name);

        let shared = self.shared.clone();
        let (vertex, fragment) = (entry.vertex.clone(), entry.fragment.clone());
        self.pool.spawn(move || {
            let loaded = match ShaderSource::load(&vertex, &fragment) {
                Ok(source) => {
                    debug!("Read sources of \"{}\"", name);
                    ResourceState::Loaded(source)
                }
                Err(err) => ResourceState::Failed(err.to_string()),
            };

            shared.finish(&name, generation, loaded);
        });
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<Arc<ResourceState>> {
        let states = self.shared.states.lock().unwrap();
        states.get(name.as_ref()).map(|slot| slot.state.clone())
    }

    /// Blocks until `name` is no longer loading.
    pub fn wait(&self, name: impl AsRef<str>) -> Option<Arc<ResourceState>> {
        let mut states = self.shared.states.lock().unwrap();
        loop {
            match states.get(name.as_ref()) {
                None => return None,
                Some(slot) if !slot.state.is_loading() => return Some(slot.state.clone()),
                Some(_) => (),
            }
            states = self.shared.changed.wait(states).unwrap();
        }
    }

    pub fn names(&self) -> Vec<String> {
        let states = self.shared.states.lock().unwrap();
        let mut names: Vec<String> = states.keys().cloned().collect();
        names.sort();
        names
    }
}
