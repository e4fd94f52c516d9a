//! NativeView demo - Main Entry Point
//!
//! Binds a view to the fixture, delegates clicks on `h1` and `div`, clicks
//! everything, drops the `h1` delegation, clicks again and tears down.

mod config;

use anyhow::Context;
use config::Config;
use nativeview::{
    Document, ElementBound, Event, EventDelegating, EventListener, NativeView, ViewOptions,
};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args().skip(1));

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!("Starting NativeView demo...");

    let doc = Rc::new(Document::new(&config.url));
    nativeview_html::set_inner_html(&doc, doc.body(), &config.fixture)
        .context("failed to load fixture")?;

    let view = NativeView::new(doc.clone(), ViewOptions::new().el(config.root_selector.as_str()))?;
    let root = view
        .element()
        .with_context(|| format!("'{}' matched nothing", config.root_selector))?;

    let report = |label: &'static str| {
        EventListener::new(move |doc: &Document, e: &mut Event| {
            let tag = e.delegate_target.and_then(|n| doc.tag_name(n)).unwrap_or_default();
            tracing::info!("{} clicked (delegate target <{}>)", label, tag);
        })
    };
    view.delegate("click.demo", Some("h1"), report("h1"))?;
    view.delegate("click.demo", Some("div"), report("div"))?;

    let click_all = |view: &NativeView| -> anyhow::Result<()> {
        for node in view.find("h1, div")?.into_vec() {
            doc.dispatch_event(node, &mut Event::bubbling("click"))?;
        }
        Ok(())
    };

    click_all(&view)?;

    view.undelegate("click", Some("h1"), None);
    tracing::info!("Undelegated h1, {} delegation(s) left", view.delegation_table().len());
    click_all(&view)?;

    view.remove_element();
    tracing::info!(
        "Removed view element: attached={}, listeners={}",
        doc.contains(root),
        doc.total_listener_count(root)
    );
    println!("{}", nativeview_html::outer_html(&doc, doc.body()));

    Ok(())
}
