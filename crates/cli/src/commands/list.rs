//! list command - List objects in the bucket
//!
//! Prints object names in the order the service returns them, following
//! every result page.

use clap::Args;
use gcsu_core::{Access, ListOptions, ObjectInfo, ObjectStore, Result, Settings};
use serde::Serialize;

use crate::output::Formatter;

/// List objects
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list objects whose name starts with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Show size and last update time for each object
    #[arg(short, long)]
    pub long: bool,
}

/// Output structure for list command (JSON format)
#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    bucket: &'a str,
    items: &'a [ObjectInfo],
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct Summary {
    total_objects: usize,
    total_size_bytes: i64,
    total_size_human: String,
}

/// Execute the list command
pub async fn execute(args: ListArgs, settings: &Settings, formatter: &Formatter) -> Result<()> {
    let client = super::connect(settings).await?;

    formatter.step(&format!(
        "Fetching object list from bucket '{}'...",
        settings.bucket
    ));

    let items = list_all(&client, &settings.bucket, args.prefix.clone()).await?;
    render(&items, &settings.bucket, &args, formatter);
    Ok(())
}

/// Collect every object in the bucket, page by page
pub(crate) async fn list_all(
    store: &dyn ObjectStore,
    bucket: &str,
    prefix: Option<String>,
) -> Result<Vec<ObjectInfo>> {
    let mut all_items = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let options = ListOptions {
            prefix: prefix.clone(),
            page_token: page_token.take(),
            max_results: Some(1000),
        };

        let page = store
            .list_objects(bucket, options)
            .await
            .map_err(|e| e.in_context(Access::Read, bucket))?;

        all_items.extend(page.items);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    tracing::debug!(bucket, count = all_items.len(), "listed objects");
    Ok(all_items)
}

fn render(items: &[ObjectInfo], bucket: &str, args: &ListArgs, formatter: &Formatter) {
    if formatter.is_json() {
        let total_size: i64 = items.iter().map(|i| i.size_bytes).sum();
        formatter.json(&ListOutput {
            bucket,
            items,
            summary: Summary {
                total_objects: items.len(),
                total_size_bytes: total_size,
                total_size_human: humansize::format_size(total_size.max(0) as u64, humansize::BINARY),
            },
        });
        return;
    }

    for line in render_lines(items, bucket, args) {
        formatter.println(&line);
    }
}

/// Text output: an empty-bucket message, or a header, one line per object
/// and a summary
fn render_lines(items: &[ObjectInfo], bucket: &str, args: &ListArgs) -> Vec<String> {
    if items.is_empty() {
        let message = match &args.prefix {
            Some(prefix) => format!("No objects matching prefix '{prefix}' in bucket '{bucket}'."),
            None => format!("Bucket '{bucket}' is empty."),
        };
        return vec![message];
    }

    let total_size: i64 = items.iter().map(|i| i.size_bytes).sum();
    let total_human = humansize::format_size(total_size.max(0) as u64, humansize::BINARY);

    let mut lines = Vec::with_capacity(items.len() + 2);
    lines.push(format!("--- Objects in bucket '{bucket}' ---"));
    lines.extend(items.iter().map(|item| format_item(item, args.long)));
    lines.push(format!("Total: {} objects, {total_human}", items.len()));
    lines
}

fn format_item(item: &ObjectInfo, long: bool) -> String {
    if !long {
        return format!("- {}", item.name);
    }

    let date = item
        .updated
        .map(|d| d.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "                   ".to_string());
    format!("- [{date}] {:>10} {}", item.size_human, item.name)
}
