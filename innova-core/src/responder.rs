//! Canned-response chat: an ordered rule table, first keyword hit wins.
//!
//! Matching is plain substring search on the lower-cased input; the reply is a
//! uniform pick from the matched pool (or the default pool).

use rand_core::RngCore;

use crate::agent::{Agent, AgentKind};
use crate::dice::pick;

/// One row of the table: any keyword present selects `responses`.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRule {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub responses: &'static [&'static str],
}

impl ResponseRule {
    /// `lowered` must already be lower-case.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub text: &'static str,
    /// Topic of the rule that fired; `None` for a default reply.
    pub topic: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct Responder {
    pub agent: Agent,
    pub welcome: &'static str,
    pub rules: &'static [ResponseRule],
    pub defaults: &'static [&'static str],
}

impl Responder {
    /// The Q&A mentor.
    pub fn mentor() -> Self {
        Self {
            agent: Agent::of(AgentKind::Mentor),
            welcome: MENTOR_WELCOME,
            rules: MENTOR_RULES,
            defaults: MENTOR_DEFAULTS,
        }
    }

    /// The floating product guide.
    pub fn guide() -> Self {
        Self {
            agent: Agent::of(AgentKind::Innovation),
            welcome: GUIDE_WELCOME,
            rules: GUIDE_RULES,
            defaults: GUIDE_DEFAULTS,
        }
    }

    /// First rule matching `input`, if any.
    pub fn rule_for(&self, input: &str) -> Option<&'static ResponseRule> {
        let lowered = input.to_lowercase();
        self.rules.iter().find(|r| r.matches(&lowered))
    }

    pub fn respond<R: RngCore + ?Sized>(&self, input: &str, rng: &mut R) -> Reply {
        match self.rule_for(input) {
            Some(rule) => Reply {
                text: *pick(rng, rule.responses),
                topic: Some(rule.topic),
            },
            None => Reply {
                text: *pick(rng, self.defaults),
                topic: None,
            },
        }
    }
}

const MENTOR_WELCOME: &str = "Hello! I'm Sage, your AI mentor for this hackathon journey. I'm here to provide context-aware guidance, answer your technical questions, and help you navigate any challenges. What would you like to know?";

static MENTOR_RULES: &[ResponseRule] = &[
    ResponseRule {
        topic: "technical",
        keywords: &["code", "programming", "debug", "error", "bug", "api", "database"],
        responses: &[
            "For debugging this issue, I'd recommend using browser dev tools and console.log() statements to trace the data flow. Also, check your API endpoints are returning the expected format.",
            "This sounds like a common async/await issue. Make sure you're properly handling promises and error cases. Would you like me to walk through a specific debugging approach?",
            "Based on typical hackathon scenarios, this could be a CORS issue or authentication problem. Let's troubleshoot systematically - first, check your network tab for failed requests.",
            "I suggest breaking this down into smaller, testable functions. Unit testing individual components will help you isolate where the issue occurs. What's the specific error message you're seeing?",
        ],
    },
    ResponseRule {
        topic: "architecture",
        keywords: &["architecture", "design", "structure", "organize", "scale", "pattern"],
        responses: &[
            "For hackathon projects, I recommend starting with a simple MVC pattern. Focus on getting a working prototype first, then refactor for better organization if time permits.",
            "Consider using a microservices approach if you have multiple team members. This allows parallel development and easier debugging. What's your current team structure?",
            "Start with a monolithic structure for rapid prototyping, but keep your components modular. This gives you flexibility to extract services later if needed.",
            "Think about your data flow first - how information moves from user input to database and back. This will guide your architectural decisions and component boundaries.",
        ],
    },
    ResponseRule {
        topic: "time",
        keywords: &["time", "deadline", "schedule", "rush", "behind", "priority"],
        responses: &[
            "Time management is crucial in hackathons! Focus on your MVP first - what's the minimum that demonstrates your core idea? Everything else is enhancement.",
            "I recommend timeboxing features. Spend 80% of your time on core functionality and 20% on polish. Better to have a working simple solution than an incomplete complex one.",
            "Consider parallel development - divide tasks by functionality (frontend/backend) or features. Make sure to integrate frequently to avoid last-minute issues.",
            "If you're behind schedule, prioritize features by user impact. What will judges notice most? Focus there first, then add nice-to-haves if time allows.",
        ],
    },
    ResponseRule {
        topic: "team",
        keywords: &["team", "collaborate", "conflict", "communication", "git", "merge"],
        responses: &[
            "Clear communication is key! Establish regular check-ins (every 2-3 hours) to sync progress and address blockers. Use a shared task board to track who's working on what.",
            "For Git workflows, I suggest feature branches with frequent merges to main. This reduces conflict resolution complexity and keeps everyone's work visible.",
            "Define clear interfaces early - if someone's building the API and another the frontend, agree on data structures upfront. This enables parallel development.",
            "Assign a 'tech lead' role to make quick architectural decisions and resolve merge conflicts. This prevents decision paralysis and keeps momentum going.",
        ],
    },
    ResponseRule {
        topic: "pitch",
        keywords: &["pitch", "presentation", "demo", "judges", "showcase", "present"],
        responses: &[
            "Focus your pitch on the problem-solution fit. Judges want to see that you understand the problem deeply and have built something that actually addresses it.",
            "Practice your demo beforehand! Have a backup plan (screenshots/video) in case of technical issues. Judges prefer a smooth narrative over live debugging.",
            "Structure your pitch: Problem (30 seconds), Solution (60 seconds), Demo (90 seconds), Market/Impact (30 seconds). Keep it crisp and compelling.",
            "Tell a story that judges can relate to. Start with a scenario they might have experienced, then show how your solution makes that scenario better.",
        ],
    },
    ResponseRule {
        topic: "support",
        keywords: &["help", "stuck", "lost", "confused", "overwhelmed", "advice"],
        responses: &[
            "Take a deep breath! Hackathons are intense, but remember that everyone faces challenges. Break your current problem into smaller pieces - what's the very next step you can take?",
            "It's normal to feel overwhelmed. Try the 'rubber duck' method - explain your problem out loud (to me or a teammate). Often the solution becomes clearer when you verbalize it.",
            "Step away for 10 minutes if you're really stuck. Sometimes a short break gives your brain the reset it needs to see the solution that was there all along.",
            "Remember why you're here - to learn, build, and have fun! Don't let perfectionism block progress. A working solution beats an elegant incomplete one every time.",
        ],
    },
];

static MENTOR_DEFAULTS: &[&str] = &[
    "That's an interesting question! Based on my hackathon experience, I'd suggest starting by clearly defining the problem you're trying to solve. What specific challenge are you facing?",
    "Great question! In hackathon contexts, I usually recommend the simplest approach that works. Can you tell me more about your specific use case so I can give more targeted advice?",
    "I can help with that! To give you the most relevant guidance, could you provide a bit more context about your project and what you're trying to achieve?",
    "Excellent question! From what I've seen in successful hackathon projects, the key is balancing ambition with feasibility. What's your current setup and what specific aspect would you like guidance on?",
    "That's a common challenge in hackathons! The best approach depends on your specific constraints. Tell me more about your timeline and technical requirements, and I can suggest a focused strategy.",
];

const GUIDE_WELCOME: &str = "Hi! I'm InnovaBot, your guide to InnovaAI! 🚀 I can help you understand our features, navigate the platform, or answer any questions about how InnovaAI can boost your hackathon success. What would you like to know?";

static GUIDE_RULES: &[ResponseRule] = &[
    ResponseRule {
        topic: "idea-evaluation",
        keywords: &["idea evaluation", "evaluate idea"],
        responses: &["Our Idea Evaluation feature uses Nova, our Innovation Agent, to analyze your hackathon ideas! 💡 It scores your concept across 5 key areas: innovation, feasibility, market potential, technical complexity, and user value. You'll get detailed feedback, strengths, improvement suggestions, and risk factors. Just describe your idea and let Nova provide expert analysis to help you build something amazing!"],
    },
    ResponseRule {
        topic: "tech-stack",
        keywords: &["tech stack", "technology", "codex"],
        responses: &["Tech Stack Suggestions is powered by Codex, our Tech Agent! ⚡ Simply tell us your project type (web app, mobile, AI, etc.) and requirements (real-time, database, authentication), and Codex will recommend the perfect technologies. You'll get frontend, backend, database, and deployment suggestions with difficulty ratings and timeline estimates. It's like having a senior developer guide your tech decisions!"],
    },
    ResponseRule {
        topic: "deadlines",
        keywords: &["deadline", "project management", "tempo"],
        responses: &["Smart Deadline Management is handled by Tempo, our Deadline Agent! ⏰ Create projects with deadlines and watch as Tempo automatically generates smart task breakdowns with due dates. Track progress in real-time as you complete tasks, get timeline insights, and receive proactive notifications about approaching deadlines. It's intelligent project management that adapts to your hackathon pace!"],
    },
    ResponseRule {
        topic: "pitch",
        keywords: &["pitch", "presentation", "optimize"],
        responses: &["Pitch Optimization features our Pitch Agent who's an expert at making presentations shine! 🎯 Upload your pitch deck or paste your script, and get detailed analysis on clarity, impact, structure, storytelling, and call-to-action. You'll receive specific improvement suggestions, judge simulation questions, and expert tips to make your pitch unforgettable. Perfect for winning those hackathon presentations!"],
    },
    ResponseRule {
        topic: "qa",
        keywords: &["q&a", "questions", "sage", "mentor"],
        responses: &["Real-time Q&A connects you with Sage, our Mentor Agent! 🧠 Ask any hackathon-related question and get context-aware, personalized responses. Whether you need debugging help, architecture advice, time management tips, or team collaboration guidance, Sage provides intelligent answers that adapt to your specific situation. It's like having an experienced mentor available 24/7!"],
    },
    ResponseRule {
        topic: "tasks",
        keywords: &["task", "todo", "checklist"],
        responses: &["Task Management helps you stay organized throughout your hackathon journey! ✅ Create tasks for any project, set priorities (high, medium, low), add due dates, and track completion. Watch your project progress update automatically as you complete tasks. Get insights on overdue items, high-priority tasks, and completion statistics. It's smart task tracking that keeps you focused on what matters most!"],
    },
    ResponseRule {
        topic: "agents",
        keywords: &["agent", "ai", "multi-agent"],
        responses: &["InnovaAI features 5 specialized AI agents working as your intelligent team! 🤖 Nova (Innovation) evaluates ideas, Codex (Tech) suggests technologies, Tempo (Deadline) manages timelines, Pitch (Presentation) optimizes pitches, and Sage (Mentor) provides guidance. Each agent has unique expertise and they collaborate to guide you through the complete hackathon workflow with smart notifications and recommendations!"],
    },
    ResponseRule {
        topic: "profile",
        keywords: &["profile", "dashboard", "stats"],
        responses: &["Your Profile Dashboard tracks your InnovaAI journey! 👤 View your projects, completed tasks, achievements, and activity timeline. Edit your bio, add social links (GitHub, LinkedIn), and showcase your hackathon experience. Unlock achievements like 'First Steps', 'Task Master', and 'Serial Innovator' as you use the platform. It's your personal hackathon portfolio that grows with every project!"],
    },
    ResponseRule {
        topic: "data",
        keywords: &["data", "save", "persist"],
        responses: &["All your data is saved locally on your device! 💾 Your projects, tasks, progress, profile information, and achievements persist across sessions. When you sign back in, everything is exactly as you left it. Your data stays private - nothing is sent to external servers. Focus on building amazing projects while InnovaAI handles the organization!"],
    },
    ResponseRule {
        topic: "workflow",
        keywords: &["workflow", "redirect", "guidance"],
        responses: &["Agent-Guided Smart Workflow Redirection is our signature feature! 🎯 Our AI agents actively analyze your progress and suggest the next logical step. Completed idea evaluation? Codex suggests moving to tech stack selection. Finished your tech stack? Tempo recommends deadline planning. It's like having an intelligent project manager guiding you through the optimal hackathon workflow for maximum success!"],
    },
    ResponseRule {
        topic: "notifications",
        keywords: &["notification", "alert", "reminder"],
        responses: &["Smart Notifications keep you on track! 🔔 Our agents send contextual alerts about approaching deadlines, suggest workflow improvements, celebrate milestones, and provide proactive guidance. See notifications on your dashboard - they're personalized based on your project status and progress. Never miss important deadlines or optimization opportunities again!"],
    },
    ResponseRule {
        topic: "hackathon",
        keywords: &["hackathon", "competition", "event"],
        responses: &["InnovaAI is specifically designed for hackathon success! 🏆 We understand the unique challenges: tight deadlines, team coordination, technical decisions under pressure, and compelling pitches. Our multi-agent system provides specialized support for every phase - from initial ideation to final presentation. Join thousands of developers who trust InnovaAI to guide their hackathon journey to victory!"],
    },
    ResponseRule {
        topic: "getting-started",
        keywords: &["get started", "begin", "start"],
        responses: &["Getting started with InnovaAI is easy! 🚀 First, sign in with your email. Then explore the dashboard and meet your AI agent team. I recommend starting with Idea Evaluation to validate your concept, then moving to Tech Stack Suggestions for implementation guidance. Create your first project in Deadline Management and watch as our agents guide you through the complete hackathon workflow!"],
    },
    ResponseRule {
        topic: "features",
        keywords: &["feature", "what can", "capabilities"],
        responses: &["InnovaAI offers comprehensive hackathon support! ✨ Key features include: AI-powered idea evaluation, smart tech stack recommendations, intelligent deadline management, pitch optimization with judge simulation, real-time Q&A mentoring, task management with progress tracking, multi-agent collaboration, smart workflow redirection, achievement system, and persistent data storage. It's your complete AI-powered hackathon companion!"],
    },
    ResponseRule {
        topic: "help",
        keywords: &["help", "support", "how"],
        responses: &["I'm here to help! 😊 You can ask me about any InnovaAI feature, how to navigate the platform, or what our AI agents can do for you. Try asking about specific features like 'How does idea evaluation work?' or 'What is smart deadline management?' I can also explain our workflow, agents, or help you understand how to maximize your hackathon success with InnovaAI!"],
    },
];

static GUIDE_DEFAULTS: &[&str] = &[
    "That's a great question about InnovaAI! 🤔 Our platform is designed to be your intelligent hackathon companion. Could you be more specific about what aspect you'd like to know about? I can explain our AI agents, features, workflow, or how we help teams succeed in hackathons!",
    "I'd love to help you understand InnovaAI better! 💡 We're a comprehensive AI-powered platform with 5 specialized agents that guide you through every phase of hackathon success. What specific feature or capability would you like me to explain?",
    "Excellent question! 🚀 InnovaAI combines intelligent project management, AI-powered analysis, and expert guidance in one platform. Whether you're curious about our agents, features, or workflow, I'm here to help. What would you like to explore first?",
    "Thanks for asking! 😊 InnovaAI is built specifically for hackathon teams who want intelligent guidance and organization. Our multi-agent system provides specialized expertise for every challenge. What aspect of the platform interests you most?",
    "Great to hear from you! 🎯 InnovaAI transforms how teams approach hackathons with AI-powered coaching and smart workflow management. I can explain any feature, agent capability, or help you understand how we boost hackathon success. What's on your mind?",
];
