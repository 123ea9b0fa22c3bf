use std::path::PathBuf;

use crate::filesystem;

/// The content categories a reconciliation run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Mods,
    ResourcePacks,
    ShaderPacks,
    DataPacks,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Mods,
        Category::ResourcePacks,
        Category::ShaderPacks,
        Category::DataPacks,
    ];

    /// Human-readable singular label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            Category::Mods => "mod",
            Category::ResourcePacks => "resource pack",
            Category::ShaderPacks => "shader pack",
            Category::DataPacks => "data pack",
        }
    }

    /// The directory name used for this category under `modrinth_updater/`.
    fn managed_name(self) -> &'static str {
        match self {
            Category::Mods => "mods",
            Category::ResourcePacks => "resourcepacks",
            Category::ShaderPacks => "shaderpacks",
            Category::DataPacks => "datapacks",
        }
    }
}

/// The directories one category operates on.
///
/// Data packs have one live directory per save; the other categories have
/// exactly one. All live directories of a category share one backup/wait
/// pair under `modrinth_updater/`.
#[derive(Debug)]
pub struct CategoryPaths {
    pub live_dirs: Vec<PathBuf>,
    pub backup_dir: PathBuf,
    pub wait_dir: PathBuf,
}

/// Configuration of one reconciliation run, constructed once at process
/// start and passed into the engine. There is no ambient global state.
#[derive(Debug)]
pub struct RunConfig {
    pub minecraft_root: PathBuf,
    pub mods: bool,
    pub resource_packs: bool,
    pub shader_packs: bool,
    pub data_packs: bool,
}

impl RunConfig {
    /// A configuration with every category enabled.
    pub fn new(minecraft_root: PathBuf) -> Self {
        Self {
            minecraft_root,
            mods: true,
            resource_packs: true,
            shader_packs: true,
            data_packs: true,
        }
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::Mods => self.mods,
            Category::ResourcePacks => self.resource_packs,
            Category::ShaderPacks => self.shader_packs,
            Category::DataPacks => self.data_packs,
        }
    }

    /// Resolves the directory layout for a category.
    ///
    /// For data packs, the live directories are the `datapacks/` folders of
    /// every save that has one; an installation without a `saves/` folder
    /// yields an empty list rather than an error.
    pub fn category_paths(&self, category: Category) -> CategoryPaths {
        let live_dirs = match category {
            Category::Mods => vec![self.minecraft_root.join("mods")],
            Category::ResourcePacks => vec![self.minecraft_root.join("resourcepacks")],
            Category::ShaderPacks => vec![self.minecraft_root.join("shaderpacks")],
            Category::DataPacks => filesystem::list_subdirs(self.minecraft_root.join("saves"))
                .unwrap_or_default()
                .into_iter()
                .map(|save| save.join("datapacks"))
                .filter(|datapacks| datapacks.is_dir())
                .collect(),
        };

        let managed = self
            .minecraft_root
            .join("modrinth_updater")
            .join(category.managed_name());

        CategoryPaths {
            live_dirs,
            backup_dir: managed.join("backup"),
            wait_dir: managed.join("wait_for_update"),
        }
    }
}

/// The platform default Minecraft installation directory.
pub fn default_minecraft_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        dirs::config_dir().map(|dir| dir.join(".minecraft"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir().map(|dir| dir.join("minecraft"))
    } else {
        dirs::home_dir().map(|dir| dir.join(".minecraft"))
    }
}
