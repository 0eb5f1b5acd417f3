//! Loading and checking authored blog posts against the [`BlogPost`] schema.

use crate::domain::post::BlogPost;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FRONT_MATTER_FENCE: &str = "---";
const POST_EXTENSIONS: [&str; 2] = ["md", "mdx"];

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{}: cannot read: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Post {
        path: PathBuf,
        #[source]
        source: PostError,
    },
}

#[derive(Error, Debug)]
pub enum PostError {
    #[error("missing front matter block delimited by `---`")]
    MissingFrontMatter,
    #[error("front matter does not match the blog schema: {0}")]
    Schema(#[from] serde_yaml::Error),
}

/// A parsed post: validated front matter plus the markdown body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostEntry {
    pub slug: String,
    pub meta: BlogPost,
    pub body: String,
}

/// Splits the leading front matter from `source` and validates it.
///
/// # Errors
/// Returns `PostError::MissingFrontMatter` if the file does not open with a `---` block,
/// or `PostError::Schema` if the block is not valid YAML for [`BlogPost`].
pub fn parse_post(source: &str) -> Result<(BlogPost, String), PostError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == FRONT_MATTER_FENCE => {}
        _ => return Err(PostError::MissingFrontMatter),
    }

    let mut front_matter = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == FRONT_MATTER_FENCE {
            closed = true;
            break;
        }
        front_matter.push_str(line);
    }
    if !closed {
        return Err(PostError::MissingFrontMatter);
    }

    let meta: BlogPost = serde_yaml::from_str(&front_matter)?;
    let body: String = lines.collect();

    Ok((meta, body.trim_start_matches(['\r', '\n']).to_string()))
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ContentError + use<> {
    let path = path.to_path_buf();
    move |source| ContentError::Io { path, source }
}

/// Reads every post in `dir`, newest first.
///
/// # Errors
/// Returns the first file that cannot be read or does not match the schema.
pub fn load_collection(dir: &Path) -> Result<Vec<PostEntry>, ContentError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err(dir))? {
        let path = entry.map_err(io_err(dir))?.path();
        let is_post = path.extension().and_then(|e| e.to_str()).is_some_and(|e| POST_EXTENSIONS.contains(&e));
        if path.is_file() && is_post {
            paths.push(path);
        }
    }
    paths.sort();

    let mut posts = Vec::with_capacity(paths.len());
    for path in paths {
        let source = std::fs::read_to_string(&path).map_err(io_err(&path))?;
        let (meta, body) = parse_post(&source).map_err(|source| ContentError::Post { path: path.clone(), source })?;
        let slug = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        tracing::debug!(slug = %slug, title = %meta.title, draft = meta.draft, "Loaded post");
        posts.push(PostEntry { slug, meta, body });
    }

    posts.sort_by(|a, b| b.meta.date.cmp(&a.meta.date).then_with(|| a.slug.cmp(&b.slug)));
    Ok(posts)
}

/// Posts that are not drafts, preserving order.
#[must_use]
pub fn published(posts: &[PostEntry]) -> Vec<&PostEntry> {
    posts.iter().filter(|p| p.meta.is_published()).collect()
}
