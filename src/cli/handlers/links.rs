//! Link extraction and slug command handlers.

use anyhow::Result;

use super::read_input;
use crate::cli::output::{LinkListing, Output, OutputFormat};
use crate::cli::{LinksArgs, SlugArgs};
use crate::infra::slugify;
use crate::markup::extract_links;

pub fn handle_links(args: &LinksArgs) -> Result<()> {
    let markup = read_input(args.file.as_deref())?;
    let links = extract_links(&markup);

    match args.format {
        OutputFormat::Human => {
            for link in &links {
                if link.display_text() == link.target() {
                    println!("{}", link.target());
                } else {
                    println!("{}  \"{}\"", link.target(), link.display_text());
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<LinkListing> = links
                .iter()
                .map(|link| LinkListing {
                    target: link.target().to_string(),
                    display_text: link.display_text().to_string(),
                })
                .collect();
            Output::new(listings).print()?;
        }
    }
    Ok(())
}

pub fn handle_slug(args: &SlugArgs) -> Result<()> {
    println!("{}", slugify(&args.title));
    Ok(())
}
