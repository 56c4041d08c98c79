//! List configured blogs

use std::io::Write;

use blogsync_core::Config;

use crate::error::Result;

/// Run the list command: one line per blog with its local directory.
pub fn run_list(config: &Config, out: &mut impl Write) -> Result<()> {
    let blog_ids = config.blog_ids();
    let width = blog_ids.iter().map(String::len).max().unwrap_or(0);

    for blog_id in &blog_ids {
        let Some(blog) = config.get(blog_id) else {
            continue;
        };
        writeln!(
            out,
            "{blog_id:<width$}  {}",
            blog.local_root_dir().display()
        )?;
    }
    Ok(())
}
