//! Default chapter table for the reward-model / test-time-scaling survey.

use super::{Chapter, Taxonomy};

const TEST_TIME_SCALING: &[&str] = &[
    "test-time",
    "test time",
    "inference-time",
    "inference time",
    "scaling",
    "scale",
    "scaling law",
    "compute scaling",
    "test-time training",
    "test-time adaptation",
    "test-time fine-tuning",
    "test time training",
    "test time adaptation",
    "test time fine-tuning",
    "test-time compute",
    "inference compute",
    "compute at inference",
    "inference optimization",
    "runtime optimization",
    "chain of thought",
    "reasoning at test time",
    "multi-step reasoning",
    "search at inference",
    "beam search",
    "sampling strategies",
    "monte carlo tree search",
    "MCTS",
    "o1",
    "strawberry",
    "reasoning model",
    "self-verification",
    "self-correction",
    "iterative refinement",
];

const REWARD_MODEL_RL: &[&str] = &[
    "reward model",
    "reward modeling",
    "reward function",
    "RLHF",
    "reinforcement learning from human feedback",
    "human feedback",
    "preference learning",
    "PPO",
    "proximal policy optimization",
    "policy gradient",
    "reinforcement learning",
    "policy optimization",
    "preference",
    "comparison",
    "ranking",
    "pairwise",
    "constitutional AI",
    "RLAIF",
    "AI feedback",
    "alignment",
    "value alignment",
    "human alignment",
    "reward hacking",
    "goodhart's law",
    "optimization pressure",
    "DPO",
    "direct preference optimization",
    "SLiC",
    "LIMA",
    "InstructGPT",
    "ChatGPT training",
];

const REWARD_MODEL_BENCHMARK: &[&str] = &[
    "benchmark",
    "evaluation",
    "dataset",
    "testbed",
    "reward model evaluation",
    "preference dataset",
    "human preference",
    "annotation",
    "helpfulness",
    "harmlessness",
    "honesty",
    "truthfulness",
    "factuality",
    "safety",
    "correlation",
    "agreement",
    "consistency",
    "reliability",
    "inter-annotator agreement",
    "kappa",
    "accuracy",
    "Anthropic HH",
    "OpenAI summarization",
    "WebGPT",
    "StackLLaMA",
    "Alpaca",
    "Vicuna",
    "summarization",
    "dialogue",
    "question answering",
    "code generation",
    "mathematical reasoning",
    "multi-dimensional",
    "aspect-based",
    "fine-grained",
    "rubric",
    "criteria",
    "dimension",
];

fn chapter(id: &str, name: &str, keywords: &[&str]) -> Chapter {
    Chapter {
        id: id.to_string(),
        name: name.to_string(),
        keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
    }
}

pub(super) fn builtin_taxonomy() -> Taxonomy {
    Taxonomy {
        chapters: vec![
            chapter("test_time_scaling", "Test-Time Scaling", TEST_TIME_SCALING),
            chapter("reward_model_rl", "Reward Model for RL", REWARD_MODEL_RL),
            chapter(
                "reward_model_benchmark",
                "Reward Model Benchmark",
                REWARD_MODEL_BENCHMARK,
            ),
        ],
    }
}
