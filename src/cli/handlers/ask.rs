//! Chat from the command line

use std::sync::Arc;

use crate::cli::output::*;
use crate::kb::KnowledgeBase;
use crate::kb::ReplyComposer;
use crate::llm::LlmService;
use crate::AppConfig;
use crate::Result;

pub async fn handle_ask(config: &AppConfig, message: &str, use_llm: bool, explain: bool) -> Result<()> {
    let kb = Arc::new(KnowledgeBase::load(&config.knowledge)?);

    if explain {
        print_kb_match(kb.find_answer(message).as_ref());
    }

    let llm = if use_llm {
        let llm = LlmService::from_config(config)?;
        if llm.is_none() {
            print_warning("No LLM key configured, answering from the knowledge base");
        }
        llm.map(Arc::new)
    } else {
        None
    };

    let composer = ReplyComposer::new(kb, llm);
    let reply = composer.reply(message, &[]).await;
    println!("{reply}");
    Ok(())
}
