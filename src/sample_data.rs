//! Sample content for an empty store, created through the accessors so the
//! write-path defaults (status, counters, timestamps) are exercised exactly
//! as they are for real content.

use std::sync::Arc;

use log::info;
use serde_json::json;

use crate::errors::Result;
use crate::services::{BlogService, StrategyService};
use crate::store::RecordStore;

/// Populate sample strategies and posts when both collections are empty.
pub async fn seed_if_empty(store: Arc<dyn RecordStore>) -> Result<()> {
    let strategies = StrategyService::new(store.clone());
    let posts = BlogService::new(store.clone());

    if !strategies.list_all().await?.is_empty() || !posts.list_all().await?.is_empty() {
        return Ok(());
    }

    info!("Empty store, adding sample content");

    for strategy in sample_strategies() {
        let created = strategies.create(strategy).await?;
        info!("Added strategy: {}", created.name);
    }
    for post in sample_posts() {
        let created = posts.create(post).await?;
        info!("Added blog post: {}", created.title);
    }
    Ok(())
}

fn sample_strategies() -> Vec<serde_json::Value> {
    vec![
        json!({
            "name": "Lido + Arbitrum Yield Strategy",
            "description": "Maximize yield by staking ETH with Lido and bridging to Arbitrum for additional DeFi opportunities.",
            "apy": 31.2,
            "risk": "Low",
            "tvl": 25000000,
            "chains": ["Ethereum", "Arbitrum"],
            "protocols": ["Lido", "Arbitrum Bridge", "Curve", "Convex"],
            "category": "Liquid Staking",
            "tags": ["Liquid Staking", "Cross-chain", "Low Risk", "High Yield"],
            "steps": [
                "Stake ETH on Lido for stETH",
                "Bridge stETH to Arbitrum",
                "Provide liquidity on Curve stETH/ETH pool",
                "Stake LP tokens on Convex for additional rewards"
            ],
            "risks": [
                { "type": "Smart Contract Risk", "level": "Low",
                  "description": "Lido and Curve are well-audited protocols with billions in TVL" },
                { "type": "Bridge Risk", "level": "Medium",
                  "description": "Arbitrum Bridge has been secure but carries inherent bridge risks" }
            ],
            "faq": [
                { "q": "Can I exit at any time?",
                  "a": "Yes, though unwinding the Curve position costs gas and may take a few minutes." }
            ],
            "changelog": [
                { "date": "2024-01-15", "change": "Initial listing" }
            ],
            "featured": true,
            "fee": "0.25%",
            "timeToSetup": "15 min",
            "minInvestment": 100,
            "maxInvestment": 1000,
            "lastUpdated": "2024-01-15"
        }),
        json!({
            "name": "Curve 3Pool + Convex Strategy",
            "description": "Earn stable yields by providing liquidity to Curve's 3Pool and maximizing rewards through Convex.",
            "apy": 8.5,
            "risk": "Low",
            "tvl": 15000000,
            "chains": ["Ethereum"],
            "protocols": ["Curve", "Convex"],
            "category": "Stablecoin",
            "tags": ["Stablecoin", "Low Risk", "Stable Yield"],
            "steps": [
                "Acquire USDC, USDT, and DAI in equal amounts",
                "Provide liquidity to Curve's 3Pool",
                "Stake LP tokens on Convex for additional rewards"
            ],
            "featured": false,
            "fee": "0.25%",
            "timeToSetup": "10 min",
            "minInvestment": 500,
            "maxInvestment": 100000,
            "lastUpdated": "2024-01-10"
        }),
    ]
}

fn sample_posts() -> Vec<serde_json::Value> {
    vec![
        json!({
            "title": "The Ultimate Guide to DeFi Yield Strategies in 2024",
            "slug": "defi-yield-strategies-2024",
            "excerpt": "Discover the most profitable and secure DeFi yield strategies for 2024. From liquid staking to yield farming, learn how to maximize your returns while managing risk.",
            "content": "# The Ultimate Guide to DeFi Yield Strategies in 2024\n\nThe DeFi landscape has evolved dramatically in 2024, offering unprecedented opportunities for yield generation.\n\n## Liquid Staking: The Foundation of Modern DeFi\n\nLiquid staking has emerged as the cornerstone of DeFi yield strategies. By staking ETH through protocols like Lido, users earn staking rewards while maintaining liquidity through liquid staking tokens.\n\n### Key Benefits\n\n- Earn ETH staking rewards (~4-6% APY)\n- Maintain liquidity with stETH\n- Use LSTs as collateral in other protocols",
            "author": "Alex Chen",
            "readTime": 8,
            "category": "Strategy",
            "tags": ["DeFi", "Yield Farming", "Liquid Staking", "Risk Management"],
            "featured": true
        }),
        json!({
            "title": "Understanding Liquid Staking Protocols: A Deep Dive",
            "slug": "understanding-liquid-staking",
            "excerpt": "Explore the mechanics of liquid staking protocols and how they revolutionize Ethereum staking. Learn about risks, rewards, and best practices.",
            "content": "# Understanding Liquid Staking Protocols: A Deep Dive\n\nLiquid staking allows users to stake ETH and receive a liquid token representing their staked position, solving the liquidity problem of traditional staking.\n\n## How It Works\n\n1. Deposit tokens with a liquid staking protocol\n2. Receive liquid staking tokens (e.g. stETH)\n3. Accrue staking rewards automatically\n4. Deploy LSTs in DeFi for additional yield",
            "author": "Sarah Kim",
            "readTime": 6,
            "category": "Education",
            "tags": ["Liquid Staking", "Ethereum", "DeFi", "Staking"],
            "featured": true
        }),
    ]
}
