// src/curated.rs
//! The curated pool: static, pre-vetted content that guarantees the engine
//! can always answer. Built once at startup, injected, never mutated.

use anyhow::{ensure, Result};

use crate::content::{ContentItem, Domain};
use crate::rng::SharedRng;

pub const CURATED_SOURCE_NAME: &str = "Curated Collection";

/// Read-only tables of pre-vetted content, grouped by domain.
#[derive(Debug)]
pub struct CuratedPool {
    facts: Vec<ContentItem>,
    news: Vec<ContentItem>,
    policy_news: Vec<ContentItem>,
    image_categories: Vec<ImageCategory>,
}

#[derive(Debug)]
struct ImageCategory {
    /// Query keywords that route to this category. Empty = default category.
    keywords: &'static [&'static str],
    label: &'static str,
    url: &'static str,
    thumbnail: &'static str,
    source_url: &'static str,
    author: &'static str,
}

impl CuratedPool {
    /// The built-in collection: tech/AI facts in five categories, fallback
    /// news, IT-policy news, and keyword-routed image templates.
    pub fn builtin() -> Self {
        let mut facts = Vec::new();
        facts.extend(programming_language_facts());
        facts.extend(computer_scientist_facts());
        facts.extend(ai_technology_facts());
        facts.extend(software_company_facts());
        facts.extend(computing_milestone_facts());

        Self {
            facts,
            news: fallback_news(),
            policy_news: policy_news(),
            image_categories: image_categories(),
        }
    }

    /// Startup check: an empty table would make `NoCandidates` reachable at
    /// runtime, so it is rejected here instead.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.facts.is_empty(), "curated facts table is empty");
        ensure!(!self.news.is_empty(), "curated news table is empty");
        ensure!(
            !self.policy_news.is_empty(),
            "curated policy news table is empty"
        );
        ensure!(
            self.image_categories
                .iter()
                .any(|c| c.keywords.is_empty()),
            "curated image tables lack a default category"
        );
        Ok(())
    }

    pub fn facts(&self) -> &[ContentItem] {
        &self.facts
    }

    pub fn news(&self) -> &[ContentItem] {
        &self.news
    }

    pub fn policy_news(&self) -> &[ContentItem] {
        &self.policy_news
    }

    /// Items for one domain, image templates instantiated for `query`.
    pub fn items_for(&self, domain: Domain, query: &str) -> Vec<ContentItem> {
        match domain {
            Domain::Fact => self.facts.clone(),
            Domain::News => self.news.clone(),
            Domain::Image => self.images_for(query),
        }
    }

    /// Curated images matching the query's category. Always non-empty: an
    /// unmatched query falls through to the default category.
    pub fn images_for(&self, query: &str) -> Vec<ContentItem> {
        let q = query.to_lowercase();
        let category = self
            .image_categories
            .iter()
            .find(|c| c.keywords.iter().any(|kw| q.contains(kw)))
            .or_else(|| self.image_categories.iter().find(|c| c.keywords.is_empty()))
            .expect("validated pool has a default image category");

        let title = if query.is_empty() {
            format!("{} Photography", category.label)
        } else {
            format!("{} - {}", title_case(query), category.label)
        };
        let mut item = ContentItem::text(title, format!("{} from the curated collection.", category.label));
        item.url = Some(category.url.to_string());
        item.thumbnail = Some(category.thumbnail.to_string());
        item.source = Some(CURATED_SOURCE_NAME.to_string());
        item.source_url = Some(category.source_url.to_string());
        item.author = Some(category.author.to_string());
        item.width = Some(800);
        item.height = Some(600);
        vec![item]
    }

    /// Uniform sample from one domain's table.
    pub fn sample(&self, domain: Domain, query: &str, rng: &SharedRng) -> ContentItem {
        let items = self.items_for(domain, query);
        items[rng.pick_index(items.len())].clone()
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn fact(title: &str, description: &str, image_suggestion: &str) -> ContentItem {
    let mut item = ContentItem::text(title, description);
    item.image_suggestion = Some(image_suggestion.to_string());
    item.source = Some(CURATED_SOURCE_NAME.to_string());
    item
}

fn news_item(title: &str, description: &str, url: &str) -> ContentItem {
    let mut item = ContentItem::text(title, description);
    item.url = Some(url.to_string());
    item.source = Some(CURATED_SOURCE_NAME.to_string());
    item
}

fn programming_language_facts() -> Vec<ContentItem> {
    vec![
        fact(
            "💻 Python Programming Language",
            "Python was created by Guido van Rossum and first released in 1991. Named after the British comedy group Monty Python, it emphasizes code readability and simplicity. Python has become one of the most popular programming languages, especially in data science, AI, and web development. Its philosophy includes 'The Zen of Python' with principles like 'Beautiful is better than ugly' and 'Simple is better than complex'.",
            "Python programming language logo code",
        ),
        fact(
            "☕ Java Programming Language",
            "Java was developed by James Gosling at Sun Microsystems and released in 1995. Originally called Oak, it was designed with the principle 'write once, run anywhere' (WORA). Java revolutionized programming with its platform independence through the Java Virtual Machine. It remains one of the most widely used programming languages in enterprise applications and Android development.",
            "Java programming language coffee cup logo",
        ),
        fact(
            "🌐 JavaScript",
            "JavaScript was created by Brendan Eich in just 10 days in 1995 while working at Netscape. Despite its name, it has no relation to Java. Originally designed to make web pages interactive, JavaScript has evolved to become a full-stack programming language. It's now used for web development, mobile apps, desktop applications, and even server-side programming with Node.js.",
            "JavaScript code on computer screen",
        ),
        fact(
            "🔧 C Programming Language",
            "C was developed by Dennis Ritchie at Bell Labs between 1969 and 1973. It's considered the foundation of modern programming languages, with many languages like C++, Java, and Python borrowing concepts from C. The famous book 'The C Programming Language' by Kernighan and Ritchie is often called the 'K&R' and is considered the bible of C programming. C is still widely used in system programming and embedded systems.",
            "C programming language vintage computer terminal",
        ),
        fact(
            "🦀 Rust Programming Language",
            "Rust was originally developed by Mozilla Research, with the first stable release in 2015. It focuses on safety, speed, and concurrency without a garbage collector. Rust prevents common programming errors like null pointer dereferences and buffer overflows at compile time. It's increasingly used in system programming, web assembly, and blockchain development. The language mascot is Ferris the Crab.",
            "Rust programming language crab mascot",
        ),
    ]
}

fn computer_scientist_facts() -> Vec<ContentItem> {
    vec![
        fact(
            "🧠 Alan Turing",
            "Alan Turing (1912-1954) is considered the father of computer science and artificial intelligence. He created the Turing Test to determine if a machine can exhibit intelligent behavior equivalent to a human. During WWII, he helped break the Enigma code, significantly shortening the war. The Turing Award, often called the 'Nobel Prize of Computing,' is named in his honor. His work laid the theoretical foundation for modern computers.",
            "Alan Turing portrait with Enigma machine",
        ),
        fact(
            "👩‍💻 Ada Lovelace",
            "Ada Lovelace (1815-1852) is often considered the world's first computer programmer. She wrote the first algorithm intended to be processed by Charles Babbage's Analytical Engine in 1843. Her notes on the engine include what is recognized as the first computer program. She envisioned that computers could go beyond pure calculation to create music and art. The Ada programming language is named in her honor.",
            "Ada Lovelace portrait with mathematical equations",
        ),
        fact(
            "🖥️ Steve Jobs",
            "Steve Jobs (1955-2011) co-founded Apple Inc. and revolutionized personal computing, mobile phones, and digital media. He introduced the Apple II, Macintosh, iPod, iPhone, and iPad, each transforming their respective industries. Known for his perfectionism and attention to design, Jobs believed in making technology accessible and beautiful. His famous Stanford commencement speech included the phrase 'Stay hungry, stay foolish.'",
            "Steve Jobs presenting iPhone on stage",
        ),
        fact(
            "🌐 Tim Berners-Lee",
            "Tim Berners-Lee invented the World Wide Web in 1989 while working at CERN. He created the first web browser, web server, and website. Remarkably, he chose not to patent his invention, believing the web should be free for everyone. He founded the World Wide Web Consortium (W3C) to oversee the web's development. He continues to advocate for an open, decentralized web and digital rights.",
            "Tim Berners-Lee with early web browser",
        ),
        fact(
            "🔍 Larry Page & Sergey Brin",
            "Larry Page and Sergey Brin co-founded Google in 1998 while PhD students at Stanford University. They developed the PageRank algorithm that became the foundation of Google's search engine. Their innovation was ranking web pages based on their relevance and authority rather than just keyword matching. Google started in a garage and grew to become one of the world's most valuable companies, revolutionizing how we access information.",
            "Google founders Larry Page Sergey Brin early office",
        ),
    ]
}

fn ai_technology_facts() -> Vec<ContentItem> {
    vec![
        fact(
            "🤖 ChatGPT",
            "ChatGPT was released by OpenAI in November 2022 and became the fastest-growing consumer application in history, reaching 100 million users in just 2 months. It's based on the GPT (Generative Pre-trained Transformer) architecture and can engage in human-like conversations, write code, create content, and solve problems. The technology represents a breakthrough in natural language processing and has sparked widespread discussion about AI's role in society.",
            "ChatGPT interface conversation artificial intelligence",
        ),
        fact(
            "🧠 Neural Networks",
            "Artificial neural networks are inspired by biological neural networks in animal brains. The concept was first introduced in 1943 by Warren McCulloch and Walter Pitts. Modern deep learning neural networks can have millions or billions of parameters and are used in image recognition, natural language processing, and game playing. The 2024 Nobel Prize in Physics was awarded to Geoffrey Hinton and John Hopfield for their foundational work on neural networks.",
            "Neural network diagram brain connections",
        ),
        fact(
            "🎯 Machine Learning",
            "Machine Learning is a subset of AI that enables computers to learn and improve from experience without being explicitly programmed. The term was coined by Arthur Samuel in 1959. ML algorithms can identify patterns in data and make predictions or decisions. Applications include recommendation systems (Netflix, Spotify), fraud detection, medical diagnosis, and autonomous vehicles. The field has exploded with the availability of big data and powerful computing.",
            "Machine learning algorithms data visualization",
        ),
        fact(
            "👁️ Computer Vision",
            "Computer Vision enables machines to interpret and understand visual information from the world. Early work began in the 1960s, but modern computer vision uses deep learning to achieve human-level performance in many tasks. Applications include facial recognition, medical imaging, autonomous vehicles, and augmented reality. The ImageNet competition, started in 2010, significantly advanced the field by providing large datasets for training.",
            "Computer vision image recognition technology",
        ),
        fact(
            "🗣️ Natural Language Processing",
            "Natural Language Processing (NLP) combines computational linguistics with machine learning to help computers understand human language. Early NLP systems were rule-based, but modern systems use statistical and neural approaches. Breakthrough applications include machine translation (Google Translate), voice assistants (Siri, Alexa), and text generation. The Transformer architecture, introduced in 2017, revolutionized NLP and led to models like GPT and BERT.",
            "Natural language processing text analysis",
        ),
    ]
}

fn software_company_facts() -> Vec<ContentItem> {
    vec![
        fact(
            "🏢 Microsoft Corporation",
            "Microsoft was founded by Bill Gates and Paul Allen in 1975, starting in a garage in Albuquerque, New Mexico. The company revolutionized personal computing with MS-DOS and Windows operating systems. Microsoft Office became the standard for productivity software. Under Satya Nadella's leadership since 2014, Microsoft has transformed into a cloud-first company with Azure becoming a major competitor to Amazon Web Services.",
            "Microsoft headquarters campus Redmond Washington",
        ),
        fact(
            "🍎 Apple Inc.",
            "Apple was founded in 1976 by Steve Jobs, Steve Wozniak, and Ronald Wayne in Jobs' parents' garage. The company introduced the Apple II, one of the first successful personal computers. After Jobs returned in 1997, Apple launched revolutionary products: iMac, iPod, iPhone, and iPad. Apple became the world's most valuable company and changed multiple industries including computers, music, phones, and tablets.",
            "Apple Park headquarters Cupertino California",
        ),
        fact(
            "🔍 Google (Alphabet)",
            "Google was founded in 1998 by Larry Page and Sergey Brin while they were PhD students at Stanford. Starting as a search engine, Google now dominates web search with over 90% market share. The company expanded into email (Gmail), mobile operating systems (Android), cloud computing, and artificial intelligence. Google's parent company Alphabet was created in 2015 to organize its various businesses.",
            "Google headquarters Mountain View California colorful",
        ),
    ]
}

fn computing_milestone_facts() -> Vec<ContentItem> {
    vec![
        fact(
            "💾 The First Computer Bug",
            "The term 'computer bug' originated in 1947 when Admiral Grace Hopper found an actual moth trapped in a Harvard Mark II computer, causing it to malfunction. She taped the moth in her logbook with the note 'First actual case of bug being found.' This incident popularized the terms 'bug' and 'debugging' in computing. Grace Hopper was also instrumental in developing the first compiler and the COBOL programming language.",
            "Grace Hopper computer bug moth logbook",
        ),
        fact(
            "🌐 The First Website",
            "The world's first website was created by Tim Berners-Lee in 1991 at CERN. The site, info.cern.ch, explained what the World Wide Web was and how to use it. It contained information about hypertext, technical details, and how to create web pages. The site is still online today and represents the humble beginning of the web that now contains billions of pages.",
            "First website CERN Tim Berners-Lee 1991",
        ),
        fact(
            "📧 The First Email",
            "The first email was sent by Ray Tomlinson in 1971 between two computers sitting side by side. He chose the @ symbol to separate the user name from the computer name, a convention still used today. The message was a test and likely said something like 'QWERTYUIOP.' This simple innovation revolutionized communication and laid the foundation for modern digital messaging.",
            "Ray Tomlinson first email 1971 computer terminal",
        ),
    ]
}

fn fallback_news() -> Vec<ContentItem> {
    vec![
        news_item(
            "🚀 OpenAI Releases GPT-4 Turbo with Vision",
            "OpenAI has announced GPT-4 Turbo, featuring improved performance, lower costs, and the ability to process images alongside text. The new model offers a 128K context window and represents a significant advancement in multimodal AI capabilities.",
            "https://openai.com/blog/gpt-4-turbo",
        ),
        news_item(
            "🤖 DeepSeek Releases Open-Source AI Models",
            "DeepSeek has released a series of open-source AI models that rival GPT-4 performance while being freely available. Their DeepSeek-V2 model shows impressive capabilities in coding, mathematics, and reasoning tasks.",
            "https://github.com/deepseek-ai",
        ),
        news_item(
            "⚡ Python 3.12 Introduces New Features",
            "Python 3.12 brings significant performance improvements, better error messages, and new syntax features. The release includes enhanced f-string capabilities, improved type hints, and up to 11% faster execution.",
            "https://docs.python.org/3.12/whatsnew/3.12.html",
        ),
        news_item(
            "🔧 JavaScript ES2024 Features Released",
            "The latest ECMAScript 2024 specification introduces new array methods, improved regex support, and better async/await handling. Notable additions include Array.prototype.toSorted() and enhanced temporal API support.",
            "https://tc39.es/ecma262/",
        ),
        news_item(
            "🌟 GitHub Copilot Gets Major Updates",
            "GitHub Copilot now features improved code suggestions, better context awareness, and support for more programming languages. The AI assistant can now understand larger codebases and provide more accurate suggestions.",
            "https://github.blog/changelog/label/copilot/",
        ),
        news_item(
            "🏛️ H1B Visa Processing Delays Impact Tech Hiring",
            "Significant delays in H1B visa processing are affecting tech company hiring plans for 2024. Companies are reporting 6-12 month delays in visa approvals, forcing them to reconsider international hiring strategies and remote work arrangements.",
            "https://www.uscis.gov/working-in-the-united-states/temporary-workers/h-1b-specialty-occupations",
        ),
        news_item(
            "💼 Remote Work Tax Laws Create Compliance Challenges",
            "New multi-state tax regulations are creating compliance challenges for IT professionals working remotely. Companies are implementing new payroll systems to handle complex tax obligations across different jurisdictions.",
            "https://www.irs.gov/newsroom/faqs-for-individuals-working-remotely",
        ),
        news_item(
            "⚖️ EU AI Act Implementation Affects Global Tech Companies",
            "The European Union's AI Act implementation is forcing global tech companies to redesign their AI systems for compliance. The regulations include strict requirements for high-risk AI applications and transparency obligations.",
            "https://digital-strategy.ec.europa.eu/en/policies/regulatory-framework-ai",
        ),
        news_item(
            "🔒 Cybersecurity Regulations Tighten for Financial Tech",
            "New cybersecurity regulations specifically targeting fintech companies require enhanced security measures and incident reporting. IT departments are implementing new security frameworks to meet compliance requirements.",
            "https://www.cisa.gov/cybersecurity",
        ),
        news_item(
            "🌐 Data Privacy Laws Expand Globally",
            "New data privacy regulations similar to GDPR are being implemented worldwide, affecting how tech companies handle user data. IT teams are updating privacy policies, data handling procedures, and user consent mechanisms.",
            "https://gdpr.eu/what-is-gdpr/",
        ),
    ]
}

fn policy_news() -> Vec<ContentItem> {
    vec![
        news_item(
            "🏛️ H1B Visa Fee Increases Impact Tech Workers",
            "Recent policy changes have increased H1B visa application fees significantly, affecting thousands of IT professionals. The new fee structure includes higher base fees and additional charges for premium processing, impacting both employers and visa applicants in the tech industry.",
            "https://www.uscis.gov/working-in-the-united-states/temporary-workers/h-1b-specialty-occupations",
        ),
        news_item(
            "📋 New I-94 Digital Requirements for Tech Professionals",
            "Updated I-94 digital entry requirements now affect how international tech workers track their legal status. The changes include new online verification systems and updated documentation requirements for maintaining legal work status in the US.",
            "https://i94.cbp.dhs.gov/",
        ),
        news_item(
            "💼 Remote Work Tax Implications for IT Workers",
            "New tax regulations affect IT professionals working remotely across state lines. Recent IRS guidance clarifies tax obligations for remote workers, particularly impacting software developers and IT consultants working for companies in different states.",
            "https://www.irs.gov/newsroom/faqs-for-individuals-working-remotely",
        ),
        news_item(
            "🔒 GDPR Compliance Updates Affect IT Departments",
            "Recent GDPR enforcement actions have resulted in significant fines for tech companies, highlighting the importance of data privacy compliance. IT departments are implementing new protocols to ensure compliance with evolving privacy regulations.",
            "https://gdpr.eu/what-is-gdpr/",
        ),
        news_item(
            "⚖️ AI Regulation Bills Impact Software Development",
            "Proposed AI regulation legislation could significantly impact how software developers build and deploy AI systems. The bills include requirements for AI transparency, bias testing, and accountability measures that will affect development workflows.",
            "https://www.congress.gov/search?q=artificial+intelligence",
        ),
        news_item(
            "🌐 Net Neutrality Changes Affect Tech Infrastructure",
            "Recent net neutrality policy changes impact how tech companies manage their infrastructure and content delivery. The changes affect bandwidth allocation, content prioritization, and infrastructure investment decisions for IT departments.",
            "https://www.fcc.gov/restoring-internet-freedom",
        ),
        news_item(
            "💳 Cryptocurrency Regulation Updates for Tech Companies",
            "New cryptocurrency regulations affect tech companies involved in blockchain development, digital payments, and crypto-related services. The updates include compliance requirements for exchanges, wallet providers, and DeFi platforms.",
            "https://www.sec.gov/spotlight/cybersecurity-enforcement-actions",
        ),
        news_item(
            "🏢 Corporate Tax Changes Impact Tech Startups",
            "Recent corporate tax policy changes specifically affect tech startups and software companies. The changes include modifications to R&D tax deductions, startup expense treatments, and international tax obligations for tech businesses.",
            "https://www.irs.gov/businesses/small-businesses-self-employed/business-taxes",
        ),
    ]
}

fn image_categories() -> Vec<ImageCategory> {
    vec![
        ImageCategory {
            keywords: &["butterfly", "bird", "flower", "nature", "animal"],
            label: "Nature Photography",
            url: "https://images.unsplash.com/photo-1444927714506-8492d94b5ba0?w=800",
            thumbnail: "https://images.unsplash.com/photo-1444927714506-8492d94b5ba0?w=400",
            source_url: "https://unsplash.com/photos/butterfly",
            author: "Nature Photographer",
        },
        ImageCategory {
            keywords: &["computer", "technology", "laptop", "phone", "tech"],
            label: "Technology",
            url: "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=800",
            thumbnail: "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=400",
            source_url: "https://unsplash.com/photos/technology",
            author: "Tech Photographer",
        },
        ImageCategory {
            keywords: &["mountain", "landscape", "sunset", "ocean", "forest"],
            label: "Landscape",
            url: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800",
            thumbnail: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400",
            source_url: "https://unsplash.com/photos/landscape",
            author: "Landscape Photographer",
        },
        // Default category so the pool can answer any query.
        ImageCategory {
            keywords: &[],
            label: "Photography",
            url: "https://images.unsplash.com/photo-1493246507139-91e8fad9978e?w=800",
            thumbnail: "https://images.unsplash.com/photo-1493246507139-91e8fad9978e?w=400",
            source_url: "https://unsplash.com/photos/landscape",
            author: "Photographer",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_pool_validates() {
        CuratedPool::builtin().validate().unwrap();
    }

    #[test]
    fn every_domain_is_non_empty() {
        let pool = CuratedPool::builtin();
        assert!(!pool.items_for(Domain::Fact, "").is_empty());
        assert!(!pool.items_for(Domain::News, "").is_empty());
        assert!(!pool.items_for(Domain::Image, "anything at all").is_empty());
    }

    #[test]
    fn butterfly_routes_to_nature_category() {
        let pool = CuratedPool::builtin();
        let images = pool.images_for("butterfly");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].title, "Butterfly - Nature Photography");
        assert_eq!(images[0].source.as_deref(), Some(CURATED_SOURCE_NAME));
    }

    #[test]
    fn unknown_query_falls_back_to_default_category() {
        let pool = CuratedPool::builtin();
        let images = pool.images_for("quasar");
        assert_eq!(images.len(), 1);
        assert!(images[0].url.is_some());
    }

    #[test]
    fn facts_have_image_suggestions_and_unique_titles() {
        let pool = CuratedPool::builtin();
        let mut titles: Vec<&str> = pool.facts().iter().map(|f| f.title.as_str()).collect();
        assert!(pool.facts().iter().all(|f| f.image_suggestion.is_some()));
        let before = titles.len();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), before, "fact titles must be unique");
    }
}
