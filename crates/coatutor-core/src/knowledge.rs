//! The topic knowledge table.
//!
//! Built-in course content lives in static tables below and is turned into
//! owned [`TopicProfile`]s once. Extra topics can be layered on top from
//! TOML files via [`crate::parser`].

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::model::{ChecklistKind, Concept, QuizQuestion, SocraticBanks, TopicProfile};
use crate::normalize::contains_phrase;

/// Case-insensitive collection of topic profiles, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    topics: Vec<TopicProfile>,
    index: HashMap<String, usize>,
}

static BUILTIN: LazyLock<KnowledgeBase> = LazyLock::new(KnowledgeBase::builtin);

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// A knowledge base holding the built-in course topics.
    pub fn builtin() -> Self {
        let mut kb = Self::new();
        for topic in BUILTIN_TOPICS {
            kb.insert(topic.to_profile());
        }
        kb
    }

    /// Shared, lazily built copy of [`KnowledgeBase::builtin`].
    pub fn shared() -> &'static KnowledgeBase {
        &BUILTIN
    }

    /// Add a profile, replacing any existing topic with the same name.
    pub fn insert(&mut self, profile: TopicProfile) {
        let key = profile.name.to_lowercase();
        match self.index.get(&key) {
            Some(&i) => self.topics[i] = profile,
            None => {
                self.index.insert(key, self.topics.len());
                self.topics.push(profile);
            }
        }
    }

    pub fn extend(&mut self, profiles: impl IntoIterator<Item = TopicProfile>) {
        for p in profiles {
            self.insert(p);
        }
    }

    pub fn get(&self, name: &str) -> Option<&TopicProfile> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.topics[i])
    }

    /// Look up a topic, falling back to a generic profile named after the request.
    pub fn get_or_generic(&self, name: &str) -> TopicProfile {
        match self.get(name) {
            Some(p) => p.clone(),
            None => {
                tracing::warn!("unknown topic '{name}', using generic profile");
                generic_profile(name)
            }
        }
    }

    pub fn topics(&self) -> &[TopicProfile] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// Profile used for topics the table does not know about.
pub fn generic_profile(name: &str) -> TopicProfile {
    let name = if name.trim().is_empty() {
        "this topic".to_string()
    } else {
        name.trim().to_string()
    };
    TopicProfile {
        name,
        kind: ChecklistKind::Components,
        concepts: vec![],
        practice_checklist: strings(&[
            "Define the main idea",
            "Include the key components",
            "Mention an example",
        ]),
        flow_steps: vec![],
        socratic: SocraticBanks {
            purpose: strings(&[
                "What problem do you think {topic} was designed to solve?",
                "Why would a computer need {topic} at all?",
            ]),
            system_level: strings(&[
                "Where does {topic} sit in the overall computer system?",
                "What other parts of the system does {topic} interact with?",
            ]),
            components: strings(&[
                "What are the main building blocks of {topic}?",
                "Which part of {topic} do you think does most of the work?",
            ]),
            data_flow: strings(&[
                "How does information move through {topic}, step by step?",
                "What happens to the data right after it enters {topic}?",
            ]),
        },
        quiz: vec![],
    }
}

/// A video topic the dashboard can play.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoMatch {
    /// The keyword from the request that selected this video.
    pub keyword: String,
    /// Video topic title.
    pub title: String,
}

/// Fixed keyword → video topic table, checked in order.
static VIDEO_TOPICS: &[(&str, &str)] = &[
    ("instruction cycle", "The Instruction Cycle"),
    ("fetch", "The Instruction Cycle"),
    ("von neumann", "Von Neumann Architecture"),
    ("architecture", "Von Neumann Architecture"),
    ("memory hierarchy", "Memory Hierarchy"),
    ("pipelining", "Instruction Pipelining"),
    ("pipeline", "Instruction Pipelining"),
    ("cache", "Cache Memory"),
    ("alu", "Inside the ALU"),
    ("registers", "CPU Registers"),
    ("register", "CPU Registers"),
];

/// Match free text against the video table.
pub fn find_video(text: &str) -> Option<VideoMatch> {
    VIDEO_TOPICS
        .iter()
        .find(|(kw, _)| contains_phrase(text, kw))
        .map(|(kw, title)| VideoMatch {
            keyword: kw.to_string(),
            title: title.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Built-in course content
// ---------------------------------------------------------------------------

struct BuiltinTopic {
    name: &'static str,
    kind: ChecklistKind,
    concepts: &'static [(&'static str, &'static str)],
    checklist: &'static [&'static str],
    flow: &'static [&'static str],
    purpose: &'static [&'static str],
    system_level: &'static [&'static str],
    components: &'static [&'static str],
    data_flow: &'static [&'static str],
    quiz: &'static [(&'static str, &'static [&'static str], usize, &'static str)],
}

impl BuiltinTopic {
    fn to_profile(&self) -> TopicProfile {
        TopicProfile {
            name: self.name.to_string(),
            kind: self.kind,
            concepts: self
                .concepts
                .iter()
                .map(|(k, e)| Concept {
                    keyword: k.to_string(),
                    explanation: e.to_string(),
                })
                .collect(),
            practice_checklist: strings(self.checklist),
            flow_steps: strings(self.flow),
            socratic: SocraticBanks {
                purpose: strings(self.purpose),
                system_level: strings(self.system_level),
                components: strings(self.components),
                data_flow: strings(self.data_flow),
            },
            quiz: self
                .quiz
                .iter()
                .map(|(prompt, options, answer, explanation)| QuizQuestion {
                    prompt: prompt.to_string(),
                    options: strings(options),
                    answer: *answer,
                    explanation: explanation.to_string(),
                })
                .collect(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static BUILTIN_TOPICS: &[BuiltinTopic] = &[
    BuiltinTopic {
        name: "Instruction Cycle",
        kind: ChecklistKind::Sequence,
        concepts: &[
            ("program counter", "The Program Counter (PC) holds the address of the next instruction to fetch. It is incremented after each fetch unless a jump changes it."),
            ("instruction register", "The Instruction Register (IR) holds the instruction that was just fetched so the control unit can decode it."),
            ("fetch", "In the fetch phase the CPU copies the instruction at the address in the PC from memory into the IR, then increments the PC."),
            ("decode", "In the decode phase the control unit interprets the opcode in the IR and works out which operands and units are needed."),
            ("execute", "In the execute phase the ALU or other units carry out the operation the instruction describes."),
            ("store", "In the store (write-back) phase the result is written to a register or to memory."),
            ("mar", "The Memory Address Register (MAR) holds the address the CPU is about to read from or write to."),
            ("mdr", "The Memory Data Register (MDR) holds the data just read from memory or about to be written to it."),
            ("control unit", "The control unit sequences the cycle, issuing the signals that move data between registers, memory and the ALU."),
        ],
        checklist: &[
            "Mention Fetch phase",
            "Mention Decode phase",
            "Mention Execute phase",
            "Include Program Counter",
        ],
        flow: &["Fetch", "Decode", "Execute", "Store"],
        purpose: &[
            "Why do you think a CPU needs a repeating cycle to run a program?",
            "What would go wrong if the CPU tried to execute an instruction before knowing what it was?",
            "What is the {topic} ultimately trying to accomplish for a running program?",
        ],
        system_level: &[
            "Which parts of the computer take part in the {topic}?",
            "How do the CPU and main memory cooperate during the {topic}?",
        ],
        components: &[
            "Which register tells the CPU where the next instruction is?",
            "Where does the fetched instruction wait while it is being decoded?",
            "What role does {concept} play in the cycle?",
        ],
        data_flow: &[
            "Trace an instruction from memory to the Instruction Register. Which registers does it pass through?",
            "After the execute phase, where does the result go?",
            "How does {concept} change from one cycle to the next?",
        ],
        quiz: &[
            ("Which register holds the address of the next instruction?", &["Instruction Register", "Program Counter", "Accumulator", "MDR"], 1, "The Program Counter always points at the next instruction to fetch."),
            ("What is the correct order of the basic instruction cycle?", &["Decode, Fetch, Execute", "Fetch, Execute, Decode", "Fetch, Decode, Execute", "Execute, Fetch, Decode"], 2, "An instruction must be fetched before it can be decoded, and decoded before it can be executed."),
            ("During the fetch phase the instruction is copied into the...", &["ALU", "Instruction Register", "Stack", "Cache tag"], 1, "The fetched instruction is loaded into the Instruction Register for decoding."),
        ],
    },
    BuiltinTopic {
        name: "Von Neumann Architecture",
        kind: ChecklistKind::Components,
        concepts: &[
            ("stored program", "In a stored-program computer, instructions and data live in the same memory, so programs can be loaded and changed like data."),
            ("alu", "The Arithmetic Logic Unit (ALU) performs arithmetic and logical operations on data held in registers."),
            ("control unit", "The control unit fetches and decodes instructions and directs the other units by issuing control signals."),
            ("memory unit", "The memory unit stores both program instructions and the data they operate on."),
            ("input unit", "The input unit brings data and programs into the computer from devices such as keyboards and disks."),
            ("output unit", "The output unit delivers results from the computer to devices such as displays and printers."),
            ("bus", "Buses are shared sets of wires (address, data, control) that connect the CPU, memory and I/O."),
            ("bottleneck", "The von Neumann bottleneck is the limit on throughput caused by instructions and data sharing one path to memory."),
        ],
        checklist: &[
            "Include Input Unit",
            "Include Output Unit",
            "Include Memory Unit",
            "Include Arithmetic Logic Unit",
            "Include Control Unit",
        ],
        flow: &["Input", "Memory", "Processing", "Output"],
        purpose: &[
            "What problem did storing programs in memory solve for early computers?",
            "Why might it be useful for instructions and data to share the same memory?",
        ],
        system_level: &[
            "How are the major units of a {topic} machine connected to each other?",
            "What limits the speed of a {topic} machine as a whole?",
        ],
        components: &[
            "Which unit decides what the computer should do next?",
            "Which unit actually performs calculations?",
            "How does {concept} fit among the other units?",
        ],
        data_flow: &[
            "Follow a number typed on the keyboard all the way to the screen. Which units does it visit?",
            "Why do instructions and data compete for the same bus?",
            "What travels to and from {concept} during a calculation?",
        ],
        quiz: &[
            ("In the Von Neumann model, instructions and data are stored...", &["in separate memories", "in the same memory", "only in registers", "only on disk"], 1, "The stored-program concept keeps instructions and data in one memory."),
            ("Which unit performs arithmetic and logic operations?", &["Control Unit", "Memory Unit", "ALU", "Input Unit"], 2, "The ALU carries out arithmetic and logical operations."),
        ],
    },
    BuiltinTopic {
        name: "Memory Hierarchy",
        kind: ChecklistKind::Components,
        concepts: &[
            ("registers", "Registers are the smallest and fastest storage, located inside the CPU."),
            ("cache", "Cache is small, fast memory between the CPU and main memory that keeps recently used data close."),
            ("main memory", "Main memory (RAM) holds running programs and their data; it is larger but slower than cache."),
            ("secondary storage", "Secondary storage (SSD, HDD) is large, persistent and much slower than RAM."),
            ("locality", "Locality of reference: programs tend to reuse recent data (temporal) and data near it (spatial), which is why caching works."),
            ("access time", "Access time grows as you move down the hierarchy, while cost per bit falls."),
        ],
        checklist: &[
            "Include Registers",
            "Include Cache memory",
            "Include Main Memory",
            "Include Secondary Storage",
            "Mention Locality of reference",
        ],
        flow: &["Registers", "Cache", "Main Memory", "Secondary Storage"],
        purpose: &[
            "Why not build the whole computer's memory out of the fastest technology?",
            "What trade-off is the {topic} trying to balance?",
        ],
        system_level: &[
            "How does the CPU decide which level of the {topic} to look in first?",
            "What happens to overall performance when most accesses hit the top levels?",
        ],
        components: &[
            "Which level is closest to the CPU, and why is it so small?",
            "What makes secondary storage different from main memory?",
            "Where does {concept} sit in the hierarchy?",
        ],
        data_flow: &[
            "When data is not in cache, where does the CPU go next, and what gets copied back up?",
            "How does locality of reference decide what stays near the top?",
            "What moves into {concept}, and when?",
        ],
        quiz: &[
            ("Which level of the memory hierarchy is fastest?", &["Main memory", "Registers", "Cache", "SSD"], 1, "Registers live inside the CPU and are the fastest storage."),
            ("Caching is effective mainly because of...", &["locality of reference", "large disk sizes", "virtual memory", "interrupts"], 0, "Programs reuse nearby and recent data, so a small cache captures most accesses."),
        ],
    },
    BuiltinTopic {
        name: "Pipelining",
        kind: ChecklistKind::Sequence,
        concepts: &[
            ("hazard", "A hazard is a situation that prevents the next instruction from executing in its planned cycle (structural, data or control)."),
            ("stall", "A stall (bubble) delays later instructions until a hazard clears."),
            ("forwarding", "Forwarding passes a result directly from a later stage to an earlier one so dependent instructions need not wait for write-back."),
            ("throughput", "Pipelining raises throughput, the number of instructions completed per unit time, without shortening each instruction's latency."),
            ("write back", "Write back is the final stage, where the result is stored in the register file."),
            ("branch prediction", "Branch prediction guesses the outcome of a branch so the pipeline can keep fetching instead of stalling."),
        ],
        checklist: &[
            "Mention Fetch phase",
            "Mention Decode phase",
            "Mention Execute phase",
            "Mention Memory Access phase",
            "Mention Write Back phase",
            "Define Hazards",
        ],
        flow: &["Fetch", "Decode", "Execute", "Memory Access", "Write Back"],
        purpose: &[
            "Why would overlapping instructions make a processor faster?",
            "What is {topic} trading away in exchange for throughput?",
        ],
        system_level: &[
            "How many instructions can be in flight at once in a five-stage pipeline?",
            "What happens to the whole pipeline when one instruction has to wait?",
        ],
        components: &[
            "What does each pipeline stage need to hand to the next one?",
            "Which kinds of hazards can stop the pipeline?",
            "How does {concept} affect the pipeline?",
        ],
        data_flow: &[
            "If one instruction needs the result of the previous one, when is that value actually available?",
            "Walk an instruction through all five stages. What happens in each?",
            "How does {concept} change the flow of instructions?",
        ],
        quiz: &[
            ("Pipelining primarily improves...", &["latency of one instruction", "instruction throughput", "memory capacity", "clock skew"], 1, "Overlapping stages completes more instructions per unit time."),
            ("A data hazard occurs when...", &["two instructions need the same hardware", "an instruction depends on a result not yet written", "a branch is taken", "the cache misses"], 1, "Data hazards come from dependencies on results still in the pipeline."),
        ],
    },
    BuiltinTopic {
        name: "Cache Memory",
        kind: ChecklistKind::Components,
        concepts: &[
            ("hit", "A cache hit means the requested data was found in the cache."),
            ("miss", "A cache miss means the data was not in the cache and must be fetched from a lower level."),
            ("mapping", "Mapping decides where a memory block may be placed in the cache: direct-mapped, fully associative or set-associative."),
            ("tag", "The tag stored with each cache line identifies which memory block the line currently holds."),
            ("replacement", "A replacement policy (LRU, FIFO, random) chooses which line to evict when a set is full."),
            ("write through", "Write-through updates main memory on every write; write-back delays it until the line is evicted."),
        ],
        checklist: &[
            "Define Cache hit",
            "Define Cache miss",
            "Include Mapping technique",
            "Include Replacement policy",
            "Mention Write policy",
        ],
        flow: &["CPU Request", "Check Cache", "Fetch from Main Memory", "Update Cache", "Return Data"],
        purpose: &[
            "Why put a small memory between the CPU and RAM at all?",
            "What would happen to performance if there were no {topic}?",
        ],
        system_level: &[
            "How does the hit rate of the {topic} affect average memory access time?",
            "Where does the {topic} sit relative to the CPU and main memory?",
        ],
        components: &[
            "What information does each cache line need besides the data itself?",
            "Why do caches need a replacement policy?",
            "What part does {concept} play in a cache lookup?",
        ],
        data_flow: &[
            "Walk through a read that misses the cache. What happens at each step?",
            "On a write, when does main memory find out about the new value?",
            "What happens right after a {concept}?",
        ],
        quiz: &[
            ("In a direct-mapped cache, each memory block can go to...", &["any line", "exactly one line", "one of two lines", "no line"], 1, "Direct mapping fixes a single possible line for each block."),
            ("Which policy updates main memory on every write?", &["Write-back", "Write-through", "LRU", "FIFO"], 1, "Write-through propagates every write to main memory immediately."),
        ],
    },
];
