mod module_finder;

pub use module_finder::{find_modules, GradleModule, ModuleFinder};
