//! Almacén de imágenes procesadas
//!
//! Guarda la pareja principal + miniatura bajo un identificador nuevo con el
//! convenio `{id}_main.jpg` / `{id}_thumb.jpg` y devuelve las rutas públicas
//! (`/uploads/{archivo}`). El borrado es idempotente: que falte un archivo no
//! es un error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::utils::errors::AppResult;

pub const PUBLIC_PREFIX: &str = "/uploads";

const MAIN_SUFFIX: &str = "_main.jpg";
const THUMB_SUFFIX: &str = "_thumb.jpg";

/// Pareja de archivos ya escritos en disco
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub id: Uuid,
    pub main_filename: String,
    pub thumbnail_filename: String,
    pub main_url: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    public_prefix: String,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            public_prefix: PUBLIC_PREFIX.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Crear el directorio de subidas si no existe
    pub async fn ensure_root(&self) -> AppResult<()> {
        fs::create_dir_all(&self.root).await?;
        info!("📁 Directorio de imágenes listo: {}", self.root.display());
        Ok(())
    }

    pub fn public_url(&self, filename: &str) -> String {
        format!("{}/{}", self.public_prefix, filename)
    }

    /// Guardar principal y miniatura bajo un id nuevo.
    ///
    /// Si falla la miniatura se intenta borrar la principal antes de devolver
    /// el error, para no dejar una pareja a medias.
    pub async fn store(&self, main: &[u8], thumbnail: &[u8]) -> AppResult<StoredAsset> {
        let id = Uuid::new_v4();
        let main_filename = format!("{}{}", id, MAIN_SUFFIX);
        let thumbnail_filename = format!("{}{}", id, THUMB_SUFFIX);

        let main_path = self.root.join(&main_filename);
        fs::write(&main_path, main).await?;

        if let Err(e) = fs::write(self.root.join(&thumbnail_filename), thumbnail).await {
            remove_if_exists(&main_path).await;
            return Err(e.into());
        }

        debug!("💾 Imagen guardada: {} ({} bytes)", main_filename, main.len());

        Ok(StoredAsset {
            id,
            main_url: self.public_url(&main_filename),
            thumbnail_url: self.public_url(&thumbnail_filename),
            main_filename,
            thumbnail_filename,
        })
    }

    /// Borrar ambas variantes a partir del nombre de la principal.
    /// Los fallos de disco se registran y se ignoran.
    pub async fn remove(&self, main_filename: &str) {
        let Some(main_name) = safe_filename(main_filename) else {
            warn!("⚠️ Nombre de archivo no válido, no se borra: {}", main_filename);
            return;
        };

        remove_if_exists(&self.root.join(main_name)).await;
        remove_if_exists(&self.root.join(thumbnail_filename_for(main_name))).await;
    }
}

/// Nombre de la miniatura derivado por sustitución de sufijo
pub fn thumbnail_filename_for(main_filename: &str) -> String {
    match main_filename.strip_suffix(MAIN_SUFFIX) {
        Some(stem) => format!("{}{}", stem, THUMB_SUFFIX),
        None => main_filename.replace("_main.", "_thumb."),
    }
}

/// Solo nombres planos: nada de rutas relativas fuera del directorio
fn safe_filename(name: &str) -> Option<&str> {
    let path = Path::new(name);
    match path.file_name().and_then(|f| f.to_str()) {
        Some(file) if file == name && !name.is_empty() => Some(name),
        _ => None,
    }
}

async fn remove_if_exists(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("🗑️ Archivo eliminado: {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("⚠️ No se pudo eliminar {}: {}", path.display(), e),
    }
}
